use std::io::Write;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet, XlsxError};

use super::model::{CellValue, OutputTable};
use crate::error::{FilterError, Result};

// ---------------------------------------------------------------------------
// Destination path
// ---------------------------------------------------------------------------

/// Work out where the output file goes.
///
/// * directory and file name → `directory/file_name`
/// * file name only → relative to the current working directory
/// * no file name → [`FilterError::DestinationUndefined`]
///
/// Empty strings count as unset.
pub fn resolve_destination(directory: Option<&Path>, file_name: Option<&str>) -> Result<PathBuf> {
    let directory = directory.filter(|d| !d.as_os_str().is_empty());
    let file_name = file_name
        .filter(|n| !n.trim().is_empty())
        .ok_or(FilterError::DestinationUndefined)?;

    match directory {
        Some(dir) => Ok(dir.join(file_name)),
        None => {
            let cwd = std::env::current_dir()
                .map_err(|e| anyhow::Error::new(e).context("resolving current directory"))?;
            Ok(cwd.join(file_name))
        }
    }
}

// ---------------------------------------------------------------------------
// Workbook output
// ---------------------------------------------------------------------------

/// Write `table` as a single-sheet workbook at `destination`, replacing any
/// existing file.  Every cell of the header-by-rows block gets a thin black
/// border; date cells use `date_format` (Excel number format syntax).
///
/// The workbook goes to a temporary file next to `destination` and is renamed
/// over it only once fully written; on failure the destination is untouched.
pub fn write_table(table: &OutputTable, destination: &Path, date_format: &str) -> Result<()> {
    let failed = |reason: String| FilterError::WriteFailed {
        path: destination.to_path_buf(),
        reason,
    };

    let buffer = render_workbook(table, date_format).map_err(|e| failed(e.to_string()))?;

    let directory = destination
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut staged = tempfile::NamedTempFile::new_in(directory).map_err(|e| failed(e.to_string()))?;
    staged
        .write_all(&buffer)
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|e| failed(e.to_string()))?;
    staged
        .persist(destination)
        .map_err(|e| failed(e.error.to_string()))?;

    log::info!(
        "Wrote {} rows x {} columns to {}",
        table.len(),
        table.columns.len(),
        destination.display()
    );
    Ok(())
}

fn render_workbook(table: &OutputTable, date_format: &str) -> std::result::Result<Vec<u8>, XlsxError> {
    let border = Format::new()
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::Black);
    let date_border = border.clone().set_num_format(date_format);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in table.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &border)?;
    }

    for (r, row) in table.rows.iter().enumerate() {
        let excel_row = r as u32 + 1;
        for col in 0..table.columns.len() {
            let cell = row.get(col).unwrap_or(&CellValue::Null);
            write_cell(worksheet, excel_row, col as u16, cell, &border, &date_border)?;
        }
    }

    worksheet.autofit();
    workbook.save_to_buffer()
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
    border: &Format,
    date_border: &Format,
) -> std::result::Result<(), XlsxError> {
    match cell {
        CellValue::Text(s) => worksheet.write_string_with_format(row, col, s, border)?,
        CellValue::Integer(i) => worksheet.write_number_with_format(row, col, *i as f64, border)?,
        CellValue::Float(f) if f.is_finite() => {
            worksheet.write_number_with_format(row, col, *f, border)?
        }
        CellValue::Float(f) => worksheet.write_string_with_format(row, col, f.to_string(), border)?,
        CellValue::Bool(b) => worksheet.write_boolean_with_format(row, col, *b, border)?,
        CellValue::DateTime(dt) => worksheet.write_datetime_with_format(row, col, dt, date_border)?,
        CellValue::Null => worksheet.write_blank(row, col, border)?,
    };
    Ok(())
}
