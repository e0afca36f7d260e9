//! OCR Extractor Common Library
//!
//! CLIと将来のフロントエンド(GUI/WASM)で共有される型と純粋ロジック
//!
//! - `types`: 画像・抽出結果のデータモデル
//! - `selection`: 画像選択とプレビューハンドル
//! - `state`: バッチ状態とリデューサー（I/Oなし）
//! - `parser`: 抽出サービスのレスポンスパーサー
//! - `table`: 表示用の行データ

pub mod types;
pub mod selection;
pub mod state;
pub mod error;
pub mod parser;
pub mod table;
#[cfg(feature = "excel")]
pub mod export;

pub use types::{ExtractedRecord, ExtractionPayload, ExtractionResult, ImageBlob, NOT_AVAILABLE};
pub use selection::{ImageSelection, PreviewHandle, SelectedImage};
pub use state::{
    assemble_batch, BatchEvent, BatchFailure, BatchOutcome, BatchPhase, BatchState, BatchTicket,
    FailureKind,
};
pub use error::{Error, Result};
pub use parser::parse_extraction_response;
pub use table::{ResultRow, COLUMNS};
