//! CSV生成

use crate::error::{OcrError, Result};
use ocr_extractor_common::{ResultRow, COLUMNS};
use std::path::Path;

pub fn generate_csv(rows: &[ResultRow], output_path: &Path) -> Result<()> {
    let mut writer = ::csv::Writer::from_path(output_path)
        .map_err(|e| OcrError::Export(format!("CSVファイル作成エラー: {}", e)))?;

    writer
        .write_record(COLUMNS)
        .map_err(|e| OcrError::Export(format!("CSV見出し書き込みエラー: {}", e)))?;
    for row in rows {
        writer
            .write_record(row.cells())
            .map_err(|e| OcrError::Export(format!("CSV書き込みエラー: {}", e)))?;
    }
    writer.flush()?;

    Ok(())
}
