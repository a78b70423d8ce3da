use std::io::Write;

use labfill_ingest::{ColumnAccess, IngestError, LoadOptions, load_result_table};
use labfill_model::CellValue;
use tempfile::NamedTempFile;

fn create_temp_csv(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn loads_utf8_export() {
    let file = create_temp_csv(b"ID,GLU,UREA\nPETROV IV 1980,5.5,8.5\nPETROV IA 1975,5.5,6.1\n");
    let table = load_result_table(file.path(), &LoadOptions::default()).unwrap();

    assert_eq!(table.height(), 2);
    assert_eq!(table.column_names(), vec!["ID", "GLU", "UREA"]);
    assert_eq!(
        table.cell("UREA", 0).unwrap(),
        ColumnAccess::Found(CellValue::Number(8.5))
    );
}

#[test]
fn loads_windows_1251_export_with_semicolons() {
    let (bytes, _, _) = encoding_rs::WINDOWS_1251.encode("ID;UREA\nИВАНОВ ИИ 1961;7,2\nПЕТРОВ ИВ 1980;8,5\n");
    let file = create_temp_csv(&bytes);
    let options = LoadOptions::default()
        .with_encoding("windows-1251")
        .with_separator(b';');
    let table = load_result_table(file.path(), &options).unwrap();

    let ivanov = table.filter_contains("ID", "ИВАН").unwrap().found().unwrap();
    assert_eq!(ivanov.height(), 1);
    let cell = ivanov.cell("UREA", 0).unwrap().found().unwrap();
    assert_eq!(cell.as_f64(), Some(7.2));
}

#[test]
fn rejects_bytes_invalid_in_encoding() {
    let file = create_temp_csv(b"ID,UREA\n\xff\xfe\xfd,1.0\n");
    let err = load_result_table(file.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::Decode { .. }));
}

#[test]
fn rejects_empty_file() {
    let file = create_temp_csv(b"");
    let err = load_result_table(file.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::EmptyCsv { .. }));
}

#[test]
fn rejects_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err =
        load_result_table(&dir.path().join("absent.csv"), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn rejects_oversized_file() {
    let file = create_temp_csv(b"ID,UREA\nPETROV IV 1980,8.5\n");
    let options = LoadOptions::default().with_max_file_size(4);
    let err = load_result_table(file.path(), &options).unwrap_err();
    assert!(matches!(err, IngestError::FileTooLarge { max_size: 4, .. }));
}

#[test]
fn rejects_unknown_encoding_before_reading() {
    let dir = tempfile::tempdir().unwrap();
    let options = LoadOptions::default().with_encoding("ebcdic-klingon");
    let err = load_result_table(&dir.path().join("absent.csv"), &options).unwrap_err();
    assert!(matches!(err, IngestError::UnknownEncoding { .. }));
}
