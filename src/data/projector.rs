use super::model::{CellValue, CleanedRow, HeaderRow, OutputTable};
use crate::error::{FilterError, Result};

/// Narrow and reorder `rows` to `output_columns`.
///
/// Names are matched exactly against the header.  A row with no cell under
/// a selected column gets [`CellValue::Null`] there, written as a blank.
pub fn project(
    rows: &[CleanedRow],
    header: &HeaderRow,
    output_columns: &[String],
) -> Result<OutputTable> {
    let positions = output_columns
        .iter()
        .map(|name| {
            header
                .find_exact(name)
                .ok_or_else(|| FilterError::UnknownOutputColumn {
                    column: name.clone(),
                })
        })
        .collect::<Result<Vec<usize>>>()?;

    let projected = rows
        .iter()
        .map(|row| {
            positions
                .iter()
                .map(|&col| row.get(col).cloned().unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Ok(OutputTable {
        columns: output_columns.to_vec(),
        rows: projected,
    })
}
