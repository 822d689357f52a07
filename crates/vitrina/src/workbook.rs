//! Tabular test-data reader backed by `.xlsx` workbooks.
//!
//! Row 1 of a sheet is the header row; every following row becomes a
//! [`Record`] keyed by those headers. The [`Workbook`] handle owns nothing but
//! the path: every read and write reopens the file, so there is no cross-call
//! cache to invalidate and no staleness between a write and the next read.
//!
//! Spreadsheet I/O is assumed deterministic; failures raise immediately and
//! nothing retries.

use crate::result::{SuiteError, SuiteResult};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Sheet name used when the caller does not care
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// A spreadsheet cell value: a closed sum, not an open "any"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// Text cell
    String(String),
    /// Numeric cell (integers are widened to f64)
    Number(f64),
    /// Boolean cell
    Bool(bool),
    /// Absent or empty cell
    Null,
}

impl CellValue {
    /// String content, if this is a text cell
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content, if this is a number cell
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Boolean content, if this is a boolean cell
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Whether the cell is absent/empty
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    fn from_calamine(cell: &Data) -> Self {
        match cell {
            Data::Empty => Self::Null,
            Data::String(s) => Self::String(s.clone()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Self::String(s.clone()),
            Data::Float(f) => Self::Number(*f),
            Data::Int(i) => Self::Number(*i as f64),
            Data::Bool(b) => Self::Bool(*b),
            Data::DateTime(dt) => Self::Number(dt.as_f64()),
            Data::Error(e) => Self::String(e.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// One spreadsheet row as an ordered header-to-value mapping.
///
/// Keys are the literal header strings from row 1, in column order.
/// Records are constructed per read and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<(String, CellValue)>,
}

impl Record {
    /// Create an empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, preserving insertion order
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        self.fields.push((key.into(), value.into()));
    }

    /// Value under a header, `None` if the key is absent.
    ///
    /// Absent key and [`CellValue::Null`] are distinct: a null cell is
    /// present with a null value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Header keys in column order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate fields in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether at least one field holds a non-null value
    #[must_use]
    pub fn has_value(&self) -> bool {
        self.fields.iter().any(|(_, v)| !v.is_null())
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.push(k, v);
        }
        record
    }
}

/// Handle to an `.xlsx` workbook identified by path.
///
/// Holds no file handle and no parsed state between calls.
#[derive(Debug, Clone)]
pub struct Workbook {
    path: PathBuf,
}

impl Workbook {
    /// Create a handle for the workbook at `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The workbook path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all records of a named sheet.
    ///
    /// # Errors
    ///
    /// [`SuiteError::WorkbookNotFound`] if the file does not exist,
    /// [`SuiteError::SheetNotFound`] if the sheet name is absent.
    pub fn read_sheet(&self, sheet_name: &str) -> SuiteResult<Vec<Record>> {
        let mut workbook = self.open()?;
        if !workbook.sheet_names().iter().any(|n| n == sheet_name) {
            return Err(SuiteError::SheetNotFound {
                sheet: sheet_name.to_string(),
            });
        }
        let range = workbook.worksheet_range(sheet_name)?;
        tracing::debug!(sheet = sheet_name, rows = range.height(), "read sheet");
        Ok(Self::records_from_range(&range))
    }

    /// Read every sheet, preserving workbook sheet order
    pub fn read_all_sheets(&self) -> SuiteResult<Vec<(String, Vec<Record>)>> {
        let mut workbook = self.open()?;
        let names = workbook.sheet_names();
        let mut sheets = Vec::with_capacity(names.len());
        for name in names {
            let range = workbook.worksheet_range(&name)?;
            sheets.push((name, Self::records_from_range(&range)));
        }
        Ok(sheets)
    }

    /// Write records as a new single-sheet workbook, overwriting the path.
    ///
    /// The header row is derived from the key order of the first record;
    /// later records' extra keys are dropped and missing keys write as
    /// blanks. Empty input persists an empty named sheet.
    pub fn write_sheet(&self, records: &[Record], sheet_name: &str) -> SuiteResult<()> {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name)?;

        if let Some(first) = records.first() {
            let headers: Vec<String> = first.keys().map(str::to_string).collect();
            for (col, header) in headers.iter().enumerate() {
                sheet.write_string(0, col as u16, header)?;
            }
            for (row, record) in records.iter().enumerate() {
                let row = (row + 1) as u32;
                for (col, header) in headers.iter().enumerate() {
                    let col = col as u16;
                    match record.get(header) {
                        Some(CellValue::String(s)) => {
                            sheet.write_string(row, col, s)?;
                        }
                        Some(CellValue::Number(n)) => {
                            sheet.write_number(row, col, *n)?;
                        }
                        Some(CellValue::Bool(b)) => {
                            sheet.write_boolean(row, col, *b)?;
                        }
                        Some(CellValue::Null) | None => {}
                    }
                }
            }
        }

        workbook.save(&self.path)?;
        tracing::debug!(sheet = sheet_name, count = records.len(), "wrote sheet");
        Ok(())
    }

    /// Record at a 0-based row index, `None` when out of bounds
    pub fn row(&self, sheet_name: &str, index: usize) -> SuiteResult<Option<Record>> {
        Ok(self.read_sheet(sheet_name)?.into_iter().nth(index))
    }

    /// Non-null values under a column, in row order.
    ///
    /// Rows where the key is absent and rows holding a null are both
    /// excluded.
    pub fn column(&self, sheet_name: &str, column_name: &str) -> SuiteResult<Vec<CellValue>> {
        Ok(self
            .read_sheet(sheet_name)?
            .into_iter()
            .filter_map(|record| match record.get(column_name) {
                Some(value) if !value.is_null() => Some(value.clone()),
                _ => None,
            })
            .collect())
    }

    fn open(&self) -> SuiteResult<Xlsx<BufReader<File>>> {
        if !self.path.exists() {
            return Err(SuiteError::WorkbookNotFound {
                path: self.path.clone(),
            });
        }
        Ok(open_workbook(&self.path)?)
    }

    fn records_from_range(range: &Range<Data>) -> Vec<Record> {
        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            return Vec::new();
        };

        // Empty header cells are skipped, compacting the list; data cells
        // then zip positionally against the compacted headers. A column
        // under an empty header is unreachable from every record.
        let headers: Vec<String> = header_row
            .iter()
            .filter_map(|cell| {
                let value = CellValue::from_calamine(cell);
                if value.is_null() {
                    return None;
                }
                let header = value.to_string();
                if header.is_empty() {
                    None
                } else {
                    Some(header)
                }
            })
            .collect();

        rows.filter_map(|row| {
            let mut record = Record::new();
            for (idx, header) in headers.iter().enumerate() {
                let value = row.get(idx).map_or(CellValue::Null, CellValue::from_calamine);
                record.push(header.clone(), value);
            }
            if record.has_value() {
                Some(record)
            } else {
                None
            }
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod cell_value_tests {
        use super::*;

        #[test]
        fn test_accessors() {
            assert_eq!(CellValue::from("user").as_str(), Some("user"));
            assert_eq!(CellValue::from(2.5).as_number(), Some(2.5));
            assert_eq!(CellValue::from(true).as_bool(), Some(true));
            assert!(CellValue::Null.is_null());
        }

        #[test]
        fn test_int_cells_widen_to_number() {
            let value = CellValue::from_calamine(&Data::Int(7));
            assert_eq!(value.as_number(), Some(7.0));
        }

        #[test]
        fn test_display_of_whole_number() {
            assert_eq!(CellValue::Number(42.0).to_string(), "42");
        }

        #[test]
        fn test_empty_cell_is_null() {
            assert!(CellValue::from_calamine(&Data::Empty).is_null());
        }
    }

    mod record_tests {
        use super::*;

        #[test]
        fn test_key_order_preserved() {
            let record: Record = [("username", "standard_user"), ("password", "secret_sauce")]
                .into_iter()
                .collect();
            let keys: Vec<&str> = record.keys().collect();
            assert_eq!(keys, vec!["username", "password"]);
        }

        #[test]
        fn test_absent_key_vs_null_value() {
            let mut record = Record::new();
            record.push("a", CellValue::Null);
            assert!(record.get("a").is_some());
            assert!(record.get("b").is_none());
            assert!(!record.has_value());
        }

        #[test]
        fn test_has_value() {
            let mut record = Record::new();
            record.push("a", CellValue::Null);
            record.push("b", "x");
            assert!(record.has_value());
        }
    }

    mod range_extraction_tests {
        use super::*;

        fn range_of(cells: Vec<Vec<Data>>) -> Range<Data> {
            let rows = cells.len() as u32;
            let cols = cells.iter().map(Vec::len).max().unwrap_or(0) as u32;
            let mut range = Range::new((0, 0), (rows.max(1) - 1, cols.max(1) - 1));
            for (r, row) in cells.into_iter().enumerate() {
                for (c, cell) in row.into_iter().enumerate() {
                    range.set_value((r as u32, c as u32), cell);
                }
            }
            range
        }

        #[test]
        fn test_headers_zip_positionally() {
            let range = range_of(vec![
                vec![
                    Data::String("username".into()),
                    Data::String("password".into()),
                ],
                vec![
                    Data::String("standard_user".into()),
                    Data::String("secret_sauce".into()),
                ],
            ]);
            let records = Workbook::records_from_range(&range);
            assert_eq!(records.len(), 1);
            assert_eq!(
                records[0].get("username").and_then(CellValue::as_str),
                Some("standard_user")
            );
        }

        #[test]
        fn test_all_null_rows_are_dropped() {
            let range = range_of(vec![
                vec![Data::String("a".into())],
                vec![Data::Empty],
                vec![Data::String("x".into())],
            ]);
            let records = Workbook::records_from_range(&range);
            assert_eq!(records.len(), 1);
        }

        #[test]
        fn test_extra_cells_beyond_headers_ignored() {
            let range = range_of(vec![
                vec![Data::String("a".into())],
                vec![Data::String("x".into()), Data::String("orphan".into())],
            ]);
            let records = Workbook::records_from_range(&range);
            assert_eq!(records[0].len(), 1);
        }

        #[test]
        fn test_missing_trailing_cells_are_null() {
            let range = range_of(vec![
                vec![Data::String("a".into()), Data::String("b".into())],
                vec![Data::String("x".into())],
            ]);
            let records = Workbook::records_from_range(&range);
            assert_eq!(records[0].get("b"), Some(&CellValue::Null));
        }

        #[test]
        fn test_empty_header_compacts_list() {
            let range = range_of(vec![
                vec![
                    Data::String("a".into()),
                    Data::Empty,
                    Data::String("c".into()),
                ],
                vec![
                    Data::String("1".into()),
                    Data::String("2".into()),
                    Data::String("3".into()),
                ],
            ]);
            let records = Workbook::records_from_range(&range);
            let keys: Vec<&str> = records[0].keys().collect();
            assert_eq!(keys, vec!["a", "c"]);
            // positional zip against the compacted list shifts the data
            assert_eq!(
                records[0].get("c").and_then(CellValue::as_str),
                Some("2")
            );
        }
    }
}
