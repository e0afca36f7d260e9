use ocr_extractor_common::BatchFailure;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("一括抽出に失敗しました: {0}")]
    BatchFailed(BatchFailure),

    #[error("エクスポートエラー: {0}")]
    Export(String),

    #[error("入力エラー: {0}")]
    Interaction(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] ocr_extractor_common::Error),
}

pub type Result<T> = std::result::Result<T, OcrError>;
