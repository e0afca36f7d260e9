//! 出力形式ごとの統合テスト

use ocr_extractor::cli::ExportFormat;
use ocr_extractor::export::{self, table::render_table};
use ocr_extractor_common::table::rows;
use ocr_extractor_common::{ExtractedRecord, ExtractionPayload, ExtractionResult, COLUMNS};
use tempfile::tempdir;

fn create_test_result(index: usize) -> ExtractionResult {
    let mut extra = serde_json::Map::new();
    extra.insert("model".to_string(), serde_json::json!("ocr-v3"));

    ExtractionResult::new(
        format!("poster_{}.jpg", index),
        ExtractionPayload {
            extracted_data: vec![ExtractedRecord {
                topic: format!("勉強会 第{}回", index),
                venue: "市民ホール, 3F".to_string(),
                date: "2026-10-14".to_string(),
                time: if index % 2 == 0 { Some("18:30".to_string()) } else { None },
                contact: Some("03-1234-5678".to_string()),
                mode: None,
            }],
            extra,
        },
    )
}

fn results() -> Vec<ExtractionResult> {
    (1..=3).map(create_test_result).collect()
}

#[test]
fn test_json_export_keeps_order_and_extra_fields() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("results.json");

    export::write_results(&results(), ExportFormat::Json, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    let items = value.as_array().expect("配列で出力されるべき");
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["fileName"], "poster_1.jpg");
    assert_eq!(items[2]["fileName"], "poster_3.jpg");
    assert_eq!(items[0]["model"], "ocr-v3");
    // 未設定の項目は出力しない
    assert!(items[0]["extracted_data"][0].get("time").is_none());

    let restored: Vec<ExtractionResult> = serde_json::from_str(&content).unwrap();
    assert_eq!(restored, results());
}

#[test]
fn test_csv_export() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("results.csv");

    export::write_results(&results(), ExportFormat::Csv, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, COLUMNS.to_vec());

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 3);
    assert_eq!(&records[0][0], "poster_1.jpg");
    // カンマを含むセルもそのまま復元できる
    assert_eq!(&records[0][2], "市民ホール, 3F");
    assert_eq!(&records[0][4], "N/A");
    assert_eq!(&records[1][4], "18:30");
    assert_eq!(&records[0][6], "");
}

#[test]
fn test_excel_export() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("results.xlsx");

    export::write_results(&results(), ExportFormat::Excel, &path).unwrap();

    let bytes = std::fs::read(&path).expect("Excelファイルが作成されていない");
    assert!(bytes.len() > 100, "Excelファイルが小さすぎる: {} bytes", bytes.len());
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn test_table_export_to_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("results.txt");

    let written = export::export_results(&results(), ExportFormat::Table, Some(&path)).unwrap();
    assert_eq!(written.as_deref(), Some(path.as_path()));

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, render_table(&rows(&results())));
    assert!(content.lines().next().unwrap().starts_with("File Name"));
    assert_eq!(content.lines().count(), 5);
}

#[test]
fn test_table_without_output_writes_nothing() {
    let written = export::export_results(&results(), ExportFormat::Table, None).unwrap();
    assert!(written.is_none());
}

#[test]
fn test_default_output_path_uses_extension() {
    let path = export::default_output_path(ExportFormat::Csv);
    let name = path.to_string_lossy();
    assert!(name.starts_with("ocr-results-"));
    assert!(name.ends_with(".csv"));
}
