use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

// ---------------------------------------------------------------------------
// CellValue – a single spreadsheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value as read from a spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    Null,
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Workbooks store every number as a float; whole values become `Integer`
    /// so they compare the way the sheet displays them.
    pub fn from_number(v: f64) -> Self {
        if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
            CellValue::Integer(v as i64)
        } else {
            CellValue::Float(v)
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::DateTime(dt) if dt.time() == NaiveTime::MIN => {
                write!(f, "{}", dt.format("%Y-%m-%d"))
            }
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Null => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

/// One physical sheet row, positionally aligned to the sheet columns.
pub type RawRow = Vec<CellValue>;

// ---------------------------------------------------------------------------
// CleanedRow / HeaderRow – rows addressed by original column index
// ---------------------------------------------------------------------------

/// A non-null cell together with the sheet column it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub column: usize,
    pub value: CellValue,
}

/// A row with its null cells removed.  Each survivor remembers its column,
/// so rows with different blank patterns stay aligned with the header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CleanedRow {
    cells: Vec<Cell>,
}

impl CleanedRow {
    pub fn from_raw(row: &[CellValue]) -> Self {
        let cells = row
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_null())
            .map(|(column, value)| Cell {
                column,
                value: value.clone(),
            })
            .collect();
        CleanedRow { cells }
    }

    /// Cell stored for the given sheet column, if that cell was not blank.
    pub fn get(&self, column: usize) -> Option<&CellValue> {
        self.cells
            .binary_search_by_key(&column, |c| c.column)
            .ok()
            .map(|i| &self.cells[i].value)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.cells.iter().map(|c| &c.value)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether any text cell equals `marker` exactly.
    pub fn contains_text(&self, marker: &str) -> bool {
        self.values()
            .any(|v| matches!(v, CellValue::Text(s) if s == marker))
    }
}

/// A header name and the sheet column it labels.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderColumn {
    pub column: usize,
    pub name: String,
}

/// The header row located by the marker cell.  Empty when no marker was found.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderRow {
    pub columns: Vec<HeaderColumn>,
}

impl HeaderRow {
    pub fn from_cleaned(row: &CleanedRow) -> Self {
        let columns = row
            .cells()
            .iter()
            .map(|c| HeaderColumn {
                column: c.column,
                name: c.value.to_string(),
            })
            .collect();
        HeaderRow { columns }
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Sheet column of the first header equal to `name`, ignoring case and
    /// surrounding whitespace.
    pub fn find_loose(&self, name: &str) -> Option<usize> {
        let wanted = name.trim().to_lowercase();
        self.columns
            .iter()
            .find(|c| c.name.trim().to_lowercase() == wanted)
            .map(|c| c.column)
    }

    /// Sheet column of the first header exactly equal to `name`.
    pub fn find_exact(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.column)
    }
}

// ---------------------------------------------------------------------------
// Filter values
// ---------------------------------------------------------------------------

/// The comparison type picked for a filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterKind {
    #[default]
    Text,
    Integer,
    Date,
}

impl FilterKind {
    pub const ALL: [FilterKind; 3] = [FilterKind::Text, FilterKind::Integer, FilterKind::Date];
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKind::Text => write!(f, "text"),
            FilterKind::Integer => write!(f, "integer"),
            FilterKind::Date => write!(f, "date"),
        }
    }
}

/// Filter target.  The variant decides how cells are compared.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Date(NaiveDate),
}

impl FilterValue {
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterValue::Text(_) => FilterKind::Text,
            FilterValue::Integer(_) => FilterKind::Integer,
            FilterValue::Date(_) => FilterKind::Date,
        }
    }

    /// Read user-entered text as a value of `kind`.  Dates use `date_format`
    /// (chrono syntax).
    pub fn parse(kind: FilterKind, raw: &str, date_format: &str) -> crate::Result<Self> {
        let invalid = |reason: String| crate::FilterError::InvalidFilterInput {
            kind,
            raw: raw.to_string(),
            reason,
        };
        match kind {
            FilterKind::Text => Ok(FilterValue::Text(raw.to_string())),
            FilterKind::Integer => raw
                .trim()
                .parse::<i64>()
                .map(FilterValue::Integer)
                .map_err(|e| invalid(e.to_string())),
            FilterKind::Date => parse_date_text(raw.trim(), date_format)
                .map(FilterValue::Date)
                .ok_or_else(|| invalid(format!("expected format {date_format}"))),
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Text(s) => write!(f, "{s}"),
            FilterValue::Integer(i) => write!(f, "{i}"),
            FilterValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// Parse `s` as a date, or as a date-time whose date part is taken.
pub fn parse_date_text(s: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, format)
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, format)
                .ok()
                .map(|dt| dt.date())
        })
}

/// The (column name, value) pair a run filters by.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub column: String,
    pub value: FilterValue,
}

impl FilterSpec {
    pub fn new(column: impl Into<String>, value: FilterValue) -> Self {
        FilterSpec {
            column: column.into(),
            value,
        }
    }
}

// ---------------------------------------------------------------------------
// OutputTable – what gets written
// ---------------------------------------------------------------------------

/// Header labels plus projected rows, ready for the writer.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl OutputTable {
    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
