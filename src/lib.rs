//! 画像OCR抽出クライアント
//!
//! 選択した画像を1枚ずつ抽出サービスへ並列アップロードし、
//! 全件揃った結果を送信順の表として出力する。
//!
//! 状態遷移そのものは `ocr_extractor_common::state` の純粋なリデューサーが持ち、
//! このクレートはI/O（HTTP、ファイル、端末）を担当する。

pub mod cli;
pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod orchestrator;
pub mod preview;
pub mod scanner;
pub mod session;
