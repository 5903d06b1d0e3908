use std::path::Path;

use tracing::debug;

use super::{SourceError, csv_error, require_columns, to_raw_row};
use crate::model::{ColumnMap, OptionSide, RawRow};

/// Read one sheet saved as CSV with a header row.
pub fn read(path: &Path, columns: &ColumnMap, side: OptionSide) -> Result<Vec<RawRow>, SourceError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let header: Vec<String> = rdr
        .headers()
        .map_err(|e| csv_error(path, e))?
        .iter()
        .map(str::to_string)
        .collect();
    require_columns(&header, columns, side)?;

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| csv_error(path, e))?;
        rows.push(to_raw_row(&header, &record));
    }

    debug!(path = %path.display(), side = %side, rows = rows.len(), "read sheet");
    Ok(rows)
}
