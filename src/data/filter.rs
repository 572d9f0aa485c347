use super::model::{CellValue, CleanedRow, FilterSpec, FilterValue, HeaderRow, parse_date_text};
use crate::error::{FilterError, Result};

// ---------------------------------------------------------------------------
// Row filter: keep rows whose column matches the filter value
// ---------------------------------------------------------------------------

/// Return the rows whose cell under `spec.column` matches `spec.value`,
/// in their original order.
///
/// * The column is resolved ignoring case and surrounding whitespace.
/// * Rows without a cell in that column are skipped.
/// * The comparison is picked by the filter value's variant (see [`cell_matches`]).
/// * An empty result is an error, [`FilterError::NoMatchingValue`].
pub fn filter_rows(
    rows: Vec<CleanedRow>,
    header: &HeaderRow,
    spec: &FilterSpec,
    cell_date_format: &str,
) -> Result<Vec<CleanedRow>> {
    let column = header
        .find_loose(&spec.column)
        .ok_or_else(|| FilterError::UnknownColumn {
            column: spec.column.clone(),
        })?;

    let matched: Vec<CleanedRow> = rows
        .into_iter()
        .filter(|row| {
            row.get(column)
                .is_some_and(|cell| cell_matches(cell, &spec.value, cell_date_format))
        })
        .collect();

    if matched.is_empty() {
        return Err(FilterError::NoMatchingValue {
            column: spec.column.clone(),
            value: spec.value.clone(),
        });
    }

    log::info!(
        "{} rows match {} = {} ({})",
        matched.len(),
        spec.column,
        spec.value,
        spec.value.kind()
    );
    Ok(matched)
}

/// Compare one cell with the filter target.
///
/// * `Text`    – the cell as text, trimmed and lower-cased on both sides.
/// * `Integer` – numeric cells with an equal value; anything else never matches.
/// * `Date`    – date cells by calendar date, text cells parsed with
///   `cell_date_format`; unparseable cells never match.
pub fn cell_matches(cell: &CellValue, target: &FilterValue, cell_date_format: &str) -> bool {
    match target {
        FilterValue::Text(t) => cell.to_string().trim().to_lowercase() == t.trim().to_lowercase(),
        FilterValue::Integer(n) => match cell {
            CellValue::Integer(i) => i == n,
            CellValue::Float(f) => float_equals_integer(*f, *n),
            _ => false,
        },
        FilterValue::Date(d) => {
            let cell_date = match cell {
                CellValue::DateTime(dt) => Some(dt.date()),
                CellValue::Text(s) => parse_date_text(s.trim(), cell_date_format),
                _ => None,
            };
            if cell_date.is_none() {
                log::debug!("Cell '{cell}' is not a date in format {cell_date_format}");
            }
            cell_date.as_ref() == Some(d)
        }
    }
}

/// Exact comparison; `n as f64` would round integers above 2^53.
fn float_equals_integer(f: f64, n: i64) -> bool {
    // i64::MIN is -2^63 exactly; 2^63 itself is out of range.
    f.fract() == 0.0 && f >= i64::MIN as f64 && f < -(i64::MIN as f64) && f as i64 == n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RawRow;
    use chrono::NaiveDate;

    const DATE_FORMAT: &str = "%d.%m.%Y";

    fn table(rows: Vec<RawRow>) -> (HeaderRow, Vec<CleanedRow>) {
        let mut cleaned = rows.iter().map(|r| CleanedRow::from_raw(r));
        let header = HeaderRow::from_cleaned(&cleaned.next().unwrap());
        (header, cleaned.collect())
    }

    fn staff() -> (HeaderRow, Vec<CleanedRow>) {
        table(vec![
            vec!["№ п/п".into(), "Name".into(), "Dept".into()],
            vec![CellValue::Integer(1), "Alice".into(), "Eng".into()],
            vec![CellValue::Integer(2), "Bob".into(), "Eng".into()],
            vec![CellValue::Integer(3), " alice ".into(), "Sales".into()],
            vec![CellValue::Integer(4)],
        ])
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn text_match_is_trimmed_and_case_insensitive_and_ordered() {
        let (header, rows) = staff();
        let spec = FilterSpec::new("  NAME ", FilterValue::Text("ALICE".into()));
        let matched = filter_rows(rows, &header, &spec, DATE_FORMAT).unwrap();
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].get(0), Some(&CellValue::Integer(1)));
        assert_eq!(matched[1].get(0), Some(&CellValue::Integer(3)));
    }

    #[test]
    fn unknown_column() {
        let (header, rows) = staff();
        let spec = FilterSpec::new("Salary", FilterValue::Text("x".into()));
        let err = filter_rows(rows, &header, &spec, DATE_FORMAT).unwrap_err();
        assert!(matches!(err, FilterError::UnknownColumn { column } if column == "Salary"));
    }

    #[test]
    fn empty_header_reports_unknown_column() {
        let spec = FilterSpec::new("Name", FilterValue::Text("Alice".into()));
        let err = filter_rows(Vec::new(), &HeaderRow::default(), &spec, DATE_FORMAT).unwrap_err();
        assert!(matches!(err, FilterError::UnknownColumn { .. }));
    }

    #[test]
    fn zero_matches_is_an_error() {
        let (header, rows) = staff();
        let spec = FilterSpec::new("Name", FilterValue::Text("Carol".into()));
        match filter_rows(rows, &header, &spec, DATE_FORMAT).unwrap_err() {
            FilterError::NoMatchingValue { column, value } => {
                assert_eq!(column, "Name");
                assert_eq!(value, FilterValue::Text("Carol".into()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rows_missing_the_column_are_skipped() {
        let (header, rows) = staff();
        let spec = FilterSpec::new("Dept", FilterValue::Text("Eng".into()));
        let matched = filter_rows(rows, &header, &spec, DATE_FORMAT).unwrap();
        assert_eq!(matched.len(), 2);
    }

    #[test]
    fn text_target_stringifies_numbers() {
        let target = FilterValue::Text("5".into());
        assert!(cell_matches(&CellValue::Integer(5), &target, DATE_FORMAT));
        assert!(cell_matches(&CellValue::from(" 5 "), &target, DATE_FORMAT));
        assert!(!cell_matches(&CellValue::Float(5.5), &target, DATE_FORMAT));
    }

    #[test]
    fn integer_target_needs_numeric_cell() {
        let target = FilterValue::Integer(5);
        assert!(cell_matches(&CellValue::Integer(5), &target, DATE_FORMAT));
        assert!(cell_matches(&CellValue::Float(5.0), &target, DATE_FORMAT));
        assert!(!cell_matches(&CellValue::from("5"), &target, DATE_FORMAT));
        assert!(!cell_matches(&CellValue::Integer(6), &target, DATE_FORMAT));
        assert!(!cell_matches(&CellValue::Bool(true), &FilterValue::Integer(1), DATE_FORMAT));
    }

    #[test]
    fn integer_target_is_not_rounded_against_floats() {
        let big = 9_007_199_254_740_993; // 2^53 + 1
        let near = CellValue::Float(9_007_199_254_740_992.0);
        assert!(!cell_matches(&near, &FilterValue::Integer(big), DATE_FORMAT));
        assert!(cell_matches(&near, &FilterValue::Integer(big - 1), DATE_FORMAT));
        assert!(!cell_matches(&CellValue::Float(5.5), &FilterValue::Integer(5), DATE_FORMAT));
        assert!(!cell_matches(&CellValue::Float(f64::NAN), &FilterValue::Integer(0), DATE_FORMAT));
        assert!(!cell_matches(&CellValue::Float(1e19), &FilterValue::Integer(i64::MAX), DATE_FORMAT));
    }

    #[test]
    fn date_target() {
        let target = FilterValue::Date(date(2020, 1, 15));
        let evening = date(2020, 1, 15).and_hms_opt(18, 45, 0).unwrap();
        assert!(cell_matches(&CellValue::DateTime(evening), &target, DATE_FORMAT));
        assert!(cell_matches(&CellValue::from("15.01.2020"), &target, DATE_FORMAT));
        assert!(!cell_matches(&CellValue::from("16.01.2020"), &target, DATE_FORMAT));
        assert!(!cell_matches(&CellValue::from("2020-01-15"), &target, DATE_FORMAT));
        assert!(!cell_matches(&CellValue::from("Alice"), &target, DATE_FORMAT));
        assert!(!cell_matches(&CellValue::Integer(43845), &target, DATE_FORMAT));
    }

    #[test]
    fn date_filter_over_mixed_column() {
        let hired = date(2019, 6, 1).and_hms_opt(0, 0, 0).unwrap();
        let (header, rows) = table(vec![
            vec!["№ п/п".into(), "Hired".into()],
            vec![CellValue::Integer(1), CellValue::DateTime(hired)],
            vec![CellValue::Integer(2), "not a date".into()],
            vec![CellValue::Integer(3), "01.06.2019".into()],
        ]);
        let spec = FilterSpec::new("hired", FilterValue::Date(date(2019, 6, 1)));
        let matched = filter_rows(rows, &header, &spec, DATE_FORMAT).unwrap();
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[1].get(0), Some(&CellValue::Integer(3)));
    }
}
