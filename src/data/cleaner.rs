use super::model::{CleanedRow, HeaderRow, RawRow};

/// Header row plus the data rows found below it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CleanedTable {
    pub header: HeaderRow,
    pub rows: Vec<CleanedRow>,
}

/// Drop null cells from every row and split the table at the first row
/// containing `marker`.
///
/// Rows above the header and the header itself are not part of the data set.
/// Without a marker both the header and the data set come back empty; the
/// filter step then reports the missing column.
pub fn clean(rows: &[RawRow], marker: &str) -> CleanedTable {
    let mut cleaned = rows.iter().map(|r| CleanedRow::from_raw(r));

    let Some(header_row) = cleaned.by_ref().find(|r| r.contains_text(marker)) else {
        log::warn!("Header marker '{marker}' not found in {} rows", rows.len());
        return CleanedTable::default();
    };

    let header = HeaderRow::from_cleaned(&header_row);
    let data: Vec<CleanedRow> = cleaned.filter(|r| !r.is_empty()).collect();
    log::debug!(
        "Header row {:?} followed by {} data rows",
        header.names(),
        data.len()
    );

    CleanedTable { header, rows: data }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn text_rows(rows: &[&[&str]]) -> Vec<RawRow> {
        rows.iter()
            .map(|r| {
                r.iter()
                    .map(|s| {
                        if s.is_empty() {
                            CellValue::Null
                        } else {
                            CellValue::from(*s)
                        }
                    })
                    .collect()
            })
            .collect()
    }

    const MARKER: &str = "№ п/п";

    #[test]
    fn splits_at_first_marker_row() {
        let rows = text_rows(&[
            &["x"],
            &["№ п/п", "Name", "Dept"],
            &["1", "Alice", "Eng"],
            &["№ п/п", "Again", "Header"],
        ]);
        let table = clean(&rows, MARKER);
        assert_eq!(table.header.names(), vec!["№ п/п", "Name", "Dept"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].get(1), Some(&CellValue::from("Alice")));
        // a later marker row is plain data
        assert_eq!(table.rows[1].get(1), Some(&CellValue::from("Again")));
    }

    #[test]
    fn nulls_dropped_but_columns_kept() {
        let rows = text_rows(&[
            &["", "№ п/п", "", "Name", "Dept"],
            &["", "1", "", "", "Eng"],
        ]);
        let table = clean(&rows, MARKER);
        assert_eq!(table.header.find_exact("Dept"), Some(4));
        assert_eq!(table.rows[0].len(), 2);
        assert_eq!(table.rows[0].get(4), Some(&CellValue::from("Eng")));
        assert!(table.rows[0].values().all(|v| !v.is_null()));
    }

    #[test]
    fn no_marker_gives_empty_table() {
        let rows = text_rows(&[&["a", "b"], &["c", "d"]]);
        let table = clean(&rows, MARKER);
        assert!(table.header.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn header_detection_is_repeatable() {
        let rows = text_rows(&[
            &["title"],
            &["№ п/п", "A"],
            &["1", "v"],
            &["№ п/п", "B"],
        ]);
        let first = clean(&rows, MARKER);
        let second = clean(&rows, MARKER);
        assert_eq!(first, second);
        assert_eq!(first.header.names(), vec!["№ п/п", "A"]);
    }

    #[test]
    fn custom_marker() {
        let rows = text_rows(&[&["#", "Name"], &["1", "Alice"]]);
        assert!(clean(&rows, MARKER).header.is_empty());
        assert_eq!(clean(&rows, "#").rows.len(), 1);
    }
}
