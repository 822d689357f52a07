//! Reader/writer contract tests against real workbook files.

use tempfile::TempDir;
use vitrina::{CellValue, Record, SuiteError, Workbook, DEFAULT_SHEET_NAME};

fn workbook_in(dir: &TempDir, name: &str) -> Workbook {
    Workbook::new(dir.path().join(name))
}

fn login_records() -> Vec<Record> {
    vec![
        [
            ("username", CellValue::from("standard_user")),
            ("password", CellValue::from("secret_sauce")),
            ("expectSuccess", CellValue::from(true)),
        ]
        .into_iter()
        .collect(),
        [
            ("username", CellValue::from("locked_out_user")),
            ("password", CellValue::from("secret_sauce")),
            ("expectSuccess", CellValue::from(false)),
        ]
        .into_iter()
        .collect(),
    ]
}

#[test]
fn round_trip_preserves_header_order_and_fields() {
    let dir = TempDir::new().unwrap();
    let workbook = workbook_in(&dir, "login.xlsx");
    let records = login_records();

    workbook.write_sheet(&records, "LoginData").unwrap();
    let read_back = workbook.read_sheet("LoginData").unwrap();

    assert_eq!(read_back.len(), records.len());
    let keys: Vec<&str> = read_back[0].keys().collect();
    assert_eq!(keys, vec!["username", "password", "expectSuccess"]);
    assert_eq!(
        read_back[0].get("username").and_then(CellValue::as_str),
        Some("standard_user")
    );
    assert_eq!(
        read_back[1].get("expectSuccess").and_then(CellValue::as_bool),
        Some(false)
    );
}

#[test]
fn round_trip_numbers() {
    let dir = TempDir::new().unwrap();
    let workbook = workbook_in(&dir, "prices.xlsx");
    let records: Vec<Record> = vec![[("price", CellValue::from(29.99)), ("qty", CellValue::from(3i64))]
        .into_iter()
        .collect()];

    workbook.write_sheet(&records, DEFAULT_SHEET_NAME).unwrap();
    let read_back = workbook.read_sheet(DEFAULT_SHEET_NAME).unwrap();

    assert_eq!(
        read_back[0].get("price").and_then(CellValue::as_number),
        Some(29.99)
    );
    assert_eq!(
        read_back[0].get("qty").and_then(CellValue::as_number),
        Some(3.0)
    );
}

#[test]
fn headers_come_from_first_record_only() {
    let dir = TempDir::new().unwrap();
    let workbook = workbook_in(&dir, "mixed.xlsx");
    let records: Vec<Record> = vec![
        [("a", CellValue::from("1"))].into_iter().collect(),
        // extra key "b" is silently dropped; missing "a" writes as blank
        [("b", CellValue::from("2"))].into_iter().collect(),
        [("a", CellValue::from("3"))].into_iter().collect(),
    ];

    workbook.write_sheet(&records, DEFAULT_SHEET_NAME).unwrap();
    let read_back = workbook.read_sheet(DEFAULT_SHEET_NAME).unwrap();

    // the all-blank middle row is dropped on read
    assert_eq!(read_back.len(), 2);
    for record in &read_back {
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["a"]);
    }
}

#[test]
fn row_matches_read_sheet_indexing() {
    let dir = TempDir::new().unwrap();
    let workbook = workbook_in(&dir, "rows.xlsx");
    workbook.write_sheet(&login_records(), "LoginData").unwrap();

    let all = workbook.read_sheet("LoginData").unwrap();
    for (i, expected) in all.iter().enumerate() {
        let got = workbook.row("LoginData", i).unwrap();
        assert_eq!(got.as_ref(), Some(expected));
    }
    assert!(workbook.row("LoginData", all.len()).unwrap().is_none());
}

#[test]
fn column_returns_non_null_values_in_row_order() {
    let dir = TempDir::new().unwrap();
    let workbook = workbook_in(&dir, "columns.xlsx");
    let records: Vec<Record> = vec![
        [("user", CellValue::from("a")), ("note", CellValue::from("first"))]
            .into_iter()
            .collect(),
        [("user", CellValue::from("b")), ("note", CellValue::Null)]
            .into_iter()
            .collect(),
        [("user", CellValue::from("c")), ("note", CellValue::from("third"))]
            .into_iter()
            .collect(),
    ];
    workbook.write_sheet(&records, DEFAULT_SHEET_NAME).unwrap();

    let notes = workbook.column(DEFAULT_SHEET_NAME, "note").unwrap();
    assert_eq!(
        notes,
        vec![CellValue::from("first"), CellValue::from("third")]
    );

    let missing = workbook.column(DEFAULT_SHEET_NAME, "absent").unwrap();
    assert!(missing.is_empty());
}

#[test]
fn missing_file_is_resource_not_found() {
    let dir = TempDir::new().unwrap();
    let workbook = workbook_in(&dir, "never_written.xlsx");

    let err = workbook.read_sheet(DEFAULT_SHEET_NAME).unwrap_err();
    assert!(matches!(err, SuiteError::WorkbookNotFound { .. }));
}

#[test]
fn missing_sheet_is_sheet_not_found() {
    let dir = TempDir::new().unwrap();
    let workbook = workbook_in(&dir, "sheets.xlsx");
    workbook.write_sheet(&login_records(), "LoginData").unwrap();

    let err = workbook.read_sheet("NoSuchSheet").unwrap_err();
    assert!(matches!(err, SuiteError::SheetNotFound { sheet } if sheet == "NoSuchSheet"));
}

#[test]
fn read_all_sheets_preserves_workbook_order() {
    let dir = TempDir::new().unwrap();
    let workbook = workbook_in(&dir, "all.xlsx");
    workbook.write_sheet(&login_records(), "LoginData").unwrap();

    let sheets = workbook.read_all_sheets().unwrap();
    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].0, "LoginData");
    assert_eq!(sheets[0].1.len(), 2);
}

#[test]
fn empty_input_persists_an_empty_named_sheet() {
    let dir = TempDir::new().unwrap();
    let workbook = workbook_in(&dir, "empty.xlsx");
    workbook.write_sheet(&[], "Empty").unwrap();

    assert!(workbook.read_sheet("Empty").unwrap().is_empty());
    let err = workbook.read_sheet(DEFAULT_SHEET_NAME).unwrap_err();
    assert!(matches!(err, SuiteError::SheetNotFound { .. }));
}

#[test]
fn write_overwrites_previous_workbook() {
    let dir = TempDir::new().unwrap();
    let workbook = workbook_in(&dir, "overwrite.xlsx");
    workbook.write_sheet(&login_records(), "Old").unwrap();

    let replacement: Vec<Record> =
        vec![[("only", CellValue::from("row"))].into_iter().collect()];
    workbook.write_sheet(&replacement, "New").unwrap();

    let sheets = workbook.read_all_sheets().unwrap();
    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].0, "New");
    let err = workbook.read_sheet("Old").unwrap_err();
    assert!(matches!(err, SuiteError::SheetNotFound { .. }));
}
