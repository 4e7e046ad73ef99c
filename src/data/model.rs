use std::fmt;

// ---------------------------------------------------------------------------
// Cell – a single value of the raw source
// ---------------------------------------------------------------------------

/// A dynamically-typed raw cell, as guessed from the source file.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::String(s) => write!(f, "{s}"),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Null => write!(f, "<null>"),
        }
    }
}

impl Cell {
    /// A textual source field (CSV).  Kept verbatim so codes and labels
    /// such as `007` or `1.50` survive; numeric columns are parsed on read.
    pub fn from_field(s: &str) -> Self {
        if s.is_empty() {
            Cell::Null
        } else {
            Cell::String(s.to_string())
        }
    }

    /// Interpret the value as an `f64`.  Strings are parsed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Float(v) => Some(*v),
            Cell::Integer(i) => Some(*i as f64),
            Cell::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Interpret the value as a whole number.  Floats must have no
    /// fractional part (`2015.0` is accepted, `2015.5` is not).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Integer(i) => Some(*i),
            Cell::Float(v) if v.fract() == 0.0 && v.is_finite() => Some(*v as i64),
            Cell::String(s) => {
                let s = s.trim();
                s.parse().ok().or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|v| v.fract() == 0.0 && v.is_finite())
                        .map(|v| v as i64)
                })
            }
            _ => None,
        }
    }

    /// Text rendering used for label columns; null becomes the empty string.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Null => String::new(),
            other => other.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// RawTable – the source as loaded, before any cleaning
// ---------------------------------------------------------------------------

/// The raw source, column-named and row-major.  Every row has exactly
/// `columns.len()` cells; absent values are [`Cell::Null`].  Rows only enter
/// through [`RawTable::push_row`], which keeps that invariant.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>) -> Self {
        RawTable {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating it to the column count.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Null);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// CanonicalRecord / CanonicalTable – the cleaned dataset every view queries
// ---------------------------------------------------------------------------

/// One cleaned row.  `year >= 2014` and `deaths` is a rounded count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRecord {
    pub continent_code: String,
    pub continent: String,
    pub country: String,
    pub year: i32,
    pub cause: String,
    pub cause_code: String,
    pub deaths: u64,
}

/// The canonical table.  Built once per load and never mutated; subsets are
/// returned as new tables.  Row order follows the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalTable {
    records: Vec<CanonicalRecord>,
}

impl CanonicalTable {
    pub fn from_records(records: Vec<CanonicalRecord>) -> Self {
        CanonicalTable { records }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CanonicalRecord> {
        self.records.iter()
    }

    /// A new table holding the rows that satisfy `keep`, in order.
    pub fn subset(&self, keep: impl Fn(&CanonicalRecord) -> bool) -> Self {
        CanonicalTable {
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_field_keeps_text_verbatim() {
        assert_eq!(Cell::from_field(""), Cell::Null);
        assert_eq!(Cell::from_field("007"), Cell::String("007".into()));
        assert_eq!(Cell::from_field("1.50").to_text(), "1.50");
        assert_eq!(Cell::from_field("Nan").to_text(), "Nan");
        assert_eq!(Cell::from_field("Infinity").to_text(), "Infinity");
    }

    #[test]
    fn test_as_i64_rejects_fractional_years() {
        assert_eq!(Cell::Float(2015.0).as_i64(), Some(2015));
        assert_eq!(Cell::Float(2015.5).as_i64(), None);
        assert_eq!(Cell::String(" 2016 ".into()).as_i64(), Some(2016));
        assert_eq!(Cell::String("2017.0".into()).as_i64(), Some(2017));
        assert_eq!(Cell::String("2017.5".into()).as_i64(), None);
        assert_eq!(Cell::Null.as_i64(), None);
    }

    #[test]
    fn test_push_row_pads_missing_cells() {
        let mut raw = RawTable::new(vec!["a".into(), "b".into()]);
        raw.push_row(vec![Cell::Integer(1)]);
        assert_eq!(raw.rows()[0], vec![Cell::Integer(1), Cell::Null]);
    }

    #[test]
    fn test_push_row_truncates_long_rows() {
        let mut raw = RawTable::new(vec!["a".into()]);
        raw.push_row(vec![Cell::Integer(1), Cell::Integer(2), Cell::Integer(3)]);
        assert_eq!(raw.rows()[0], vec![Cell::Integer(1)]);
        assert!(raw.rows().iter().all(|r| r.len() == raw.columns().len()));
    }
}
