use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::OptionChain;

/// The strike minimizing aggregate option-writer payout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MaxPain {
    pub strike: f64,
    pub total_loss: f64,
}

/// Writer payout at one candidate strike, split by side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PainPoint {
    pub strike: f64,
    pub call_loss: f64,
    pub put_loss: f64,
    pub total_loss: f64,
}

/// Payout owed to call holders if the underlying settles at `settle`.
pub fn call_loss(calls: &OptionChain, settle: f64) -> f64 {
    calls
        .rows()
        .iter()
        .map(|r| (settle - r.strike).max(0.0) * r.open_interest_at_close)
        .sum()
}

/// Payout owed to put holders if the underlying settles at `settle`.
pub fn put_loss(puts: &OptionChain, settle: f64) -> f64 {
    puts.rows()
        .iter()
        .map(|r| (r.strike - settle).max(0.0) * r.open_interest_at_close)
        .sum()
}

/// Candidate strikes, ascending and deduplicated.
///
/// Without an explicit list this is the union of both sides' strikes, so
/// a strike listed on only one side is still considered.
pub fn candidate_strikes(
    calls: &OptionChain,
    puts: &OptionChain,
    candidates: Option<&[f64]>,
) -> Vec<f64> {
    let mut strikes: Vec<f64> = match candidates {
        Some(list) => list.iter().copied().filter(|s| s.is_finite()).collect(),
        None => calls.strikes().chain(puts.strikes()).collect(),
    };
    strikes.sort_by(f64::total_cmp);
    strikes.dedup();
    strikes
}

/// Total writer payout at every candidate strike, ascending by strike.
pub fn pain_curve(
    calls: &OptionChain,
    puts: &OptionChain,
    candidates: Option<&[f64]>,
) -> Vec<PainPoint> {
    candidate_strikes(calls, puts, candidates)
        .into_iter()
        .map(|strike| {
            let c = call_loss(calls, strike);
            let p = put_loss(puts, strike);
            PainPoint {
                strike,
                call_loss: c,
                put_loss: p,
                total_loss: c + p,
            }
        })
        .collect()
}

/// Brute-force argmin of total payout over the candidate strikes.
///
/// Ties go to the lowest candidate. Returns `None` when there are no
/// candidates at all.
pub fn compute_max_pain(
    calls: &OptionChain,
    puts: &OptionChain,
    candidates: Option<&[f64]>,
) -> Option<MaxPain> {
    let mut best: Option<MaxPain> = None;
    for point in pain_curve(calls, puts, candidates) {
        if best.is_none_or(|b| point.total_loss < b.total_loss) {
            best = Some(MaxPain {
                strike: point.strike,
                total_loss: point.total_loss,
            });
        }
    }
    best
}
