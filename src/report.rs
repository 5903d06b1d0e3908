use serde::Serialize;

use crate::max_pain::{MaxPain, PainPoint};
use crate::model::OptionChain;
use crate::series::ChartPoint;

/// Per-side figures for the summary table.
#[derive(Debug, Clone, Serialize)]
pub struct SideSummary {
    pub label: String,
    pub strikes: usize,
    pub shown: usize,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub total_change: f64,
    pub total_open_interest: f64,
}

impl SideSummary {
    pub fn new(chain: &OptionChain, shown: &[ChartPoint]) -> Self {
        Self {
            label: chain.side.to_string(),
            strikes: chain.len(),
            shown: shown.len(),
            min_price: shown.first().map(|p| p.price),
            max_price: shown.last().map(|p| p.price),
            total_change: chain.total_change(),
            total_open_interest: chain.total_open_interest(),
        }
    }
}

/// Machine-readable result of the `max-pain` command.
#[derive(Debug, Clone, Serialize)]
pub struct MaxPainReport {
    pub contract: Option<String>,
    pub future_spot_differential: f64,
    pub max_pain: Option<MaxPain>,
    pub spot_price: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub curve: Vec<PainPoint>,
}

pub fn print_summary(contract: Option<&str>, sides: &[SideSummary], report: &MaxPainReport) {
    println!("\n{}", "═".repeat(86));
    println!("  Volume/OI Details: {}", contract.unwrap_or("(contract not named)"));
    println!("{}", "═".repeat(86));
    println!(
        "  {:<8} {:>8} {:>8} {:>12} {:>12} {:>14} {:>16}",
        "Side", "Strikes", "Shown", "Price lo", "Price hi", "Change", "Open interest",
    );
    println!("  {}", "-".repeat(84));
    for s in sides {
        println!(
            "  {:<8} {:>8} {:>8} {:>12} {:>12} {:>+14.0} {:>16.0}",
            s.label,
            s.strikes,
            s.shown,
            fmt_opt(s.min_price),
            fmt_opt(s.max_price),
            s.total_change,
            s.total_open_interest,
        );
    }
    println!("{}", "═".repeat(86));
    match (&report.max_pain, report.spot_price) {
        (Some(mp), Some(spot)) => println!(
            "  Max pain strike {:.2} (spot-equivalent {:.2}), writer payout {:.2}",
            mp.strike, spot, mp.total_loss
        ),
        _ => println!("  Max pain: n/a (no strikes on either side)"),
    }
}

pub fn print_pain_curve(curve: &[PainPoint], best: Option<&MaxPain>) {
    println!();
    println!(
        "  {:>10} {:>16} {:>16} {:>16}",
        "Strike", "Call payout", "Put payout", "Total"
    );
    println!("  {}", "-".repeat(61));
    for p in curve {
        let marker = if best.is_some_and(|b| b.strike == p.strike) {
            "  <"
        } else {
            ""
        };
        println!(
            "  {:>10.2} {:>16.2} {:>16.2} {:>16.2}{marker}",
            p.strike, p.call_loss, p.put_loss, p.total_loss
        );
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.2}")).unwrap_or_else(|| "-".to_string())
}
