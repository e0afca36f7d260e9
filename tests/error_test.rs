//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use ocr_extractor::error::OcrError;
use ocr_extractor::scanner;
use ocr_extractor_common::{BatchFailure, FailureKind};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"), false);
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, OcrError::FolderNotFound(_)));
}

/// 空のフォルダをスキャンした場合
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::scan_folder(dir.path(), true);

    // 空フォルダはエラーではなく空のVecを返す
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// 画像のないフォルダをスキャンした場合
#[test]
fn test_scan_folder_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");

    std::fs::write(dir.path().join("test.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("data.json"), "{}").unwrap();

    let result = scanner::collect_images(&[dir.path().to_path_buf()], false);
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// 存在しないファイルを指定した場合
#[test]
fn test_collect_missing_path() {
    let result = scanner::collect_images(&[PathBuf::from("/nonexistent/poster.jpg")], false);
    assert!(matches!(result, Err(OcrError::FileNotFound(_))));
}

/// OcrErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        OcrError::Config("テスト設定エラー".to_string()),
        OcrError::FileNotFound("test.jpg".to_string()),
        OcrError::FolderNotFound("/path/to/folder".to_string()),
        OcrError::NoImagesFound("フォルダ".to_string()),
        OcrError::Export("Excel生成エラー".to_string()),
        OcrError::Interaction("入力が閉じられました".to_string()),
        OcrError::BatchFailed(BatchFailure::at(1, "B.png", FailureKind::NoRecords)),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// 一括抽出失敗は失敗した画像を示す
#[test]
fn test_batch_failed_message() {
    let failure = BatchFailure::at(
        1,
        "B.png",
        FailureKind::Status {
            code: 502,
            body: "bad gateway".to_string(),
        },
    );
    let display = format!("{}", OcrError::BatchFailed(failure));

    assert!(display.contains("B.png"));
    assert!(display.contains("#2"));
    assert!(display.contains("502"));
}

/// エラーのDebug実装確認
#[test]
fn test_error_debug() {
    let err = OcrError::Config("テスト".to_string());
    let debug = format!("{:?}", err);

    assert!(debug.contains("Config"));
    assert!(debug.contains("テスト"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: OcrError = io_err.into();

    assert!(matches!(err, OcrError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: OcrError = json_err.into();

    assert!(matches!(err, OcrError::JsonParse(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let common_err = ocr_extractor_common::Error::Parse("パースエラー".to_string());
    let err: OcrError = common_err.into();

    assert!(matches!(err, OcrError::Common(_)));
    assert!(format!("{}", err).contains("パースエラー"));
}

/// Excel生成エラーは共通エラーのまま伝わる
#[test]
fn test_export_error_conversion() {
    let common_err = ocr_extractor_common::Error::Export("シート名設定エラー".to_string());
    let err: OcrError = common_err.into();

    assert!(matches!(err, OcrError::Common(ocr_extractor_common::Error::Export(_))));
    assert!(format!("{}", err).contains("シート名"));
}
