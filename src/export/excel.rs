//! Excel生成（CLI版）
//!
//! 共通ライブラリのバッファ生成をファイルに書き出す

use crate::error::Result;
use ocr_extractor_common::export::excel_core::generate_excel_buffer;
use ocr_extractor_common::ResultRow;
use std::path::Path;

const SHEET_NAME: &str = "OCR Results";

pub fn generate_excel(rows: &[ResultRow], output_path: &Path) -> Result<()> {
    let buffer = generate_excel_buffer(rows, SHEET_NAME)?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}
