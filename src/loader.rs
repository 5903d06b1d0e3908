use tracing::{debug, warn};

use crate::model::{ColumnMap, OptionChain, OptionChainRow, OptionSide, PriceRange, RawRow};

/// Counts of what the loader threw away, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub input_rows: usize,
    pub unparseable: usize,
    pub out_of_range: usize,
    pub duplicate_strikes: usize,
}

/// Clean one side of the chain.
///
/// Strike and change parse as plain numbers; the close column has its
/// thousands separators stripped first. Rows with any field missing after
/// that are dropped, as are rows whose strike falls outside `strike_range`
/// (inclusive). The result is sorted ascending by strike. An empty result
/// is a valid chain.
pub fn load(
    raw_rows: &[RawRow],
    columns: &ColumnMap,
    strike_range: Option<PriceRange>,
    side: OptionSide,
) -> OptionChain {
    load_with_stats(raw_rows, columns, strike_range, side).0
}

/// [`load`], also returning the drop counts.
pub fn load_with_stats(
    raw_rows: &[RawRow],
    columns: &ColumnMap,
    strike_range: Option<PriceRange>,
    side: OptionSide,
) -> (OptionChain, LoadStats) {
    let mut stats = LoadStats {
        input_rows: raw_rows.len(),
        ..LoadStats::default()
    };

    let mut rows: Vec<OptionChainRow> = Vec::with_capacity(raw_rows.len());
    for raw in raw_rows {
        let Some(row) = normalize(raw, columns) else {
            stats.unparseable += 1;
            continue;
        };
        if let Some(range) = strike_range {
            if !range.contains(row.strike) {
                stats.out_of_range += 1;
                continue;
            }
        }
        rows.push(row);
    }

    // Stable sort keeps input order among equal strikes, so the dedup
    // below lets the last occurrence win.
    rows.sort_by(|a, b| a.strike.total_cmp(&b.strike));
    let mut deduped: Vec<OptionChainRow> = Vec::with_capacity(rows.len());
    for row in rows {
        match deduped.last_mut() {
            Some(prev) if prev.strike == row.strike => {
                warn!(side = %side, strike = row.strike, "duplicate strike, keeping last row");
                stats.duplicate_strikes += 1;
                *prev = row;
            }
            _ => deduped.push(row),
        }
    }

    debug!(
        side = %side,
        input = stats.input_rows,
        kept = deduped.len(),
        unparseable = stats.unparseable,
        out_of_range = stats.out_of_range,
        "loaded option chain"
    );

    (OptionChain::from_sorted(side, deduped), stats)
}

fn normalize(raw: &RawRow, columns: &ColumnMap) -> Option<OptionChainRow> {
    Some(OptionChainRow {
        strike: raw.get(&columns.strike).to_number()?,
        change_in_open_interest: raw.get(&columns.change).to_number()?,
        open_interest_at_close: raw.get(&columns.close).to_number_stripping_separators()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(strike: &str, change: &str, close: &str) -> RawRow {
        RawRow::new()
            .with("Strike", strike)
            .with("Change", change)
            .with("At Close", close)
    }

    #[test]
    fn test_drops_unparseable_rows() {
        let rows = vec![
            row("3300", "5", "1,234"),
            row("N/A", "5", "10"),
            row("3310", "abc", "10"),
            row("3320", "-2", ""),
        ];
        let (chain, stats) =
            load_with_stats(&rows, &ColumnMap::default(), None, OptionSide::Call);
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.rows()[0].open_interest_at_close, 1234.0);
        assert_eq!(stats.unparseable, 3);
    }

    #[test]
    fn test_sorts_and_filters_by_strike() {
        let rows = vec![
            row("3400", "1", "1"),
            row("3200", "1", "1"),
            row("3100", "1", "1"),
            row("3300", "1", "1"),
        ];
        let chain = load(
            &rows,
            &ColumnMap::default(),
            Some(PriceRange::new(3200.0, 3400.0)),
            OptionSide::Put,
        );
        let strikes: Vec<f64> = chain.strikes().collect();
        assert_eq!(strikes, vec![3200.0, 3300.0, 3400.0]);
    }

    #[test]
    fn test_duplicate_strike_last_wins() {
        let rows = vec![row("3300", "1", "10"), row("3300", "2", "20")];
        let (chain, stats) =
            load_with_stats(&rows, &ColumnMap::default(), None, OptionSide::Call);
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.rows()[0].open_interest_at_close, 20.0);
        assert_eq!(stats.duplicate_strikes, 1);
    }

    #[test]
    fn test_custom_columns() {
        let columns = ColumnMap {
            strike: "K".into(),
            change: "dOI".into(),
            close: "OI".into(),
        };
        let rows = vec![RawRow::new().with("K", 10.0).with("dOI", -1.0).with("OI", "2,000")];
        let chain = load(&rows, &columns, None, OptionSide::Call);
        assert_eq!(chain.rows()[0].change_in_open_interest, -1.0);
        assert_eq!(chain.rows()[0].open_interest_at_close, 2000.0);
    }
}
