use std::path::Path;

use tracing::{debug, info};

use super::{RawTables, SourceError, csv_error, require_columns, to_raw_row};
use crate::model::{ColumnMap, OptionSide, RawRow};

/// One table found in the export.
#[derive(Debug, Clone)]
struct Table {
    label: Option<String>,
    side: OptionSide,
    header: Vec<String>,
    rows: Vec<RawRow>,
}

enum Scan {
    Outside,
    AwaitHeader {
        label: Option<String>,
        side: OptionSide,
    },
    Inside(Table),
}

/// Read a single export holding both tables and pick one contract's pair.
///
/// With `contract` unset, the contract named by the first marker row in
/// the file is taken as the active month.
pub fn read(
    path: &Path,
    columns: &ColumnMap,
    contract: Option<&str>,
) -> Result<RawTables, SourceError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let mut records = Vec::new();
    for record in rdr.records() {
        records.push(record.map_err(|e| csv_error(path, e))?);
    }

    let tables = scan_tables(&records);
    debug!(path = %path.display(), tables = tables.len(), "scanned export");

    let active = detect_active(&tables, columns).ok_or_else(|| SourceError::NoContracts {
        path: path.display().to_string(),
    })?;

    let wanted = match contract {
        Some(label) => Some(normalize_label(label)),
        None => {
            if let Some(label) = &active.label {
                info!(contract = %label, "auto-detected active contract");
            }
            active.label.as_deref().map(normalize_label)
        }
    };
    let display_label = contract
        .map(str::to_string)
        .or_else(|| active.label.clone());

    let calls = find_table(&tables, OptionSide::Call, wanted.as_deref(), display_label.as_deref())?;
    let puts = find_table(&tables, OptionSide::Put, wanted.as_deref(), display_label.as_deref())?;

    require_columns(&calls.header, columns, OptionSide::Call)?;
    require_columns(&puts.header, columns, OptionSide::Put)?;

    Ok(RawTables {
        contract: calls.label.clone(),
        calls: calls.rows.clone(),
        puts: puts.rows.clone(),
    })
}

/// The table whose contract is charted when none is requested.
///
/// Banner lines such as "Gold Options Calls and Puts" also look like
/// markers, so prefer the first contract with a Calls and a Puts table
/// that both carry the configured columns, then any such table, then the
/// first marker of all.
fn detect_active<'a>(tables: &'a [Table], columns: &ColumnMap) -> Option<&'a Table> {
    let usable = |t: &Table| columns.names().iter().all(|name| t.header.iter().any(|h| h == name));
    let label_key = |t: &Table| t.label.as_deref().map(normalize_label);

    tables
        .iter()
        .filter(|t| usable(*t))
        .find(|t| {
            tables
                .iter()
                .any(|o| o.side != t.side && usable(o) && label_key(o) == label_key(*t))
        })
        .or_else(|| tables.iter().find(|t| usable(*t)))
        .or_else(|| tables.first())
}

fn find_table<'a>(
    tables: &'a [Table],
    side: OptionSide,
    wanted: Option<&str>,
    display_label: Option<&str>,
) -> Result<&'a Table, SourceError> {
    tables
        .iter()
        .find(|t| t.side == side && t.label.as_deref().map(normalize_label).as_deref() == wanted)
        .ok_or_else(|| SourceError::TableNotFound {
            side,
            contract: display_label.unwrap_or("(unlabelled)").to_string(),
        })
}

/// Walk the rows, cutting out every marker/header/TOTALS-bounded table.
fn scan_tables(records: &[csv::StringRecord]) -> Vec<Table> {
    let mut tables = Vec::new();
    let mut state = Scan::Outside;

    for record in records {
        let Some(lead) = leading_cell(record) else {
            continue;
        };

        if let Some((label, side)) = parse_marker(lead) {
            if let Scan::Inside(table) = std::mem::replace(&mut state, Scan::Outside) {
                tables.push(table);
            }
            state = Scan::AwaitHeader { label, side };
            continue;
        }

        state = match state {
            Scan::Outside => Scan::Outside,
            Scan::AwaitHeader { label, side } => Scan::Inside(Table {
                label,
                side,
                header: record.iter().map(str::to_string).collect(),
                rows: Vec::new(),
            }),
            Scan::Inside(mut table) => {
                if is_totals(lead) {
                    tables.push(table);
                    Scan::Outside
                } else {
                    table.rows.push(to_raw_row(&table.header, record));
                    Scan::Inside(table)
                }
            }
        };
    }

    // A table cut off by end of file still counts.
    if let Scan::Inside(table) = state {
        tables.push(table);
    }
    tables
}

fn leading_cell(record: &csv::StringRecord) -> Option<&str> {
    record.iter().find(|c| !c.is_empty())
}

/// `"OG DEC 25 Calls"` → `(Some("OG DEC 25"), Call)`; a bare `"Puts"`
/// gives no label.
fn parse_marker(cell: &str) -> Option<(Option<String>, OptionSide)> {
    let trimmed = cell.trim();
    for side in [OptionSide::Call, OptionSide::Put] {
        let word = side.marker();
        if trimmed.len() < word.len() {
            continue;
        }
        let split = trimmed.len() - word.len();
        if !trimmed.is_char_boundary(split) || !trimmed[split..].eq_ignore_ascii_case(word) {
            continue;
        }
        let prefix = &trimmed[..split];
        // "Calls" must be its own word, not the tail of a longer one.
        if !prefix.is_empty() && !prefix.ends_with(char::is_whitespace) {
            continue;
        }
        let label = prefix.trim();
        let label = (!label.is_empty()).then(|| label.to_string());
        return Some((label, side));
    }
    None
}

fn is_totals(cell: &str) -> bool {
    cell.get(..6)
        .is_some_and(|head| head.eq_ignore_ascii_case("totals"))
}

/// Case-insensitive, whitespace-collapsed form used for label matching.
fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}
