//! Reading the Volume/OI Details export into raw rows.
//!
//! The loader only ever sees `RawRow`s; everything that knows about the
//! export's cell layout (marker rows, header rows, `TOTALS` lines) lives here.

pub mod combined;
pub mod split;

use std::path::Path;

use thiserror::Error;

use crate::config::InputSource;
use crate::model::{ColumnMap, OptionSide, RawRow};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("reading {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("no {side} table found for contract {contract}")]
    TableNotFound { side: OptionSide, contract: String },

    #[error("no option tables found in {path} (expected rows like `<contract> Calls`)")]
    NoContracts { path: String },

    #[error("{side} table is missing column `{column}`")]
    MissingColumn { side: OptionSide, column: String },
}

/// Raw rows for both sides, plus the contract they belong to when the
/// export names it.
#[derive(Debug, Clone, Default)]
pub struct RawTables {
    pub contract: Option<String>,
    pub calls: Vec<RawRow>,
    pub puts: Vec<RawRow>,
}

/// Read whichever input the config names.
pub fn read(
    input: &InputSource,
    columns: &ColumnMap,
    contract: Option<&str>,
) -> Result<RawTables, SourceError> {
    match input {
        InputSource::Combined { path } => combined::read(path, columns, contract),
        InputSource::Split { calls, puts } => Ok(RawTables {
            contract: contract.map(str::to_string),
            calls: split::read(calls, columns, OptionSide::Call)?,
            puts: split::read(puts, columns, OptionSide::Put)?,
        }),
    }
}

fn csv_error(path: &Path, source: csv::Error) -> SourceError {
    SourceError::Csv {
        path: path.display().to_string(),
        source,
    }
}

/// Fail when the header lacks any configured column.
fn require_columns(
    header: &[String],
    columns: &ColumnMap,
    side: OptionSide,
) -> Result<(), SourceError> {
    for name in columns.names() {
        if !header.iter().any(|h| h == name) {
            return Err(SourceError::MissingColumn {
                side,
                column: name.to_string(),
            });
        }
    }
    Ok(())
}

/// Zip a header with one record's cells into a raw row.
fn to_raw_row(header: &[String], cells: &csv::StringRecord) -> RawRow {
    header
        .iter()
        .zip(cells.iter())
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, cell)| (name.clone(), cell))
        .collect()
}
