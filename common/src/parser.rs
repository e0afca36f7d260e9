//! 抽出サービスのレスポンスパーサー
//!
//! ボディは `{"extracted_data": [...], ...}` 形式のJSONオブジェクト。
//! レコードが0件の場合は成功扱いにせず `Error::NoRecords` を返す。

use crate::error::{Error, Result};
use crate::types::ExtractionPayload;

/// レスポンスボディをパース
///
/// # Arguments
/// * `body` - HTTPレスポンスボディ
///
/// # Returns
/// * `Ok(ExtractionPayload)` - 1件以上のレコードを含む
/// * `Err(Error::Parse)` - JSONでない、または `extracted_data` が不正
/// * `Err(Error::NoRecords)` - `extracted_data` が空
pub fn parse_extraction_response(body: &str) -> Result<ExtractionPayload> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(Error::Parse("レスポンスが空です".into()));
    }

    let payload: ExtractionPayload = serde_json::from_str(trimmed)
        .map_err(|e| Error::Parse(format!("extracted_data JSONパースエラー: {}", e)))?;

    if payload.extracted_data.is_empty() {
        return Err(Error::NoRecords);
    }

    Ok(payload)
}
