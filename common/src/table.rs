//! 表示用の行データ
//!
//! 1結果 = 1行。先頭レコードのみを使い、任意フィールドは `N/A` で埋める

use crate::types::{ExtractionResult, NOT_AVAILABLE};
use serde::Serialize;

/// 列見出し
pub const COLUMNS: [&str; 7] = [
    "File Name",
    "Topic",
    "Venue",
    "Date",
    "Time",
    "Phone Number",
    "Mode",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    pub file_name: String,
    pub topic: String,
    pub venue: String,
    pub date: String,
    pub time: String,
    pub contact: String,
    pub mode: String,
}

impl ResultRow {
    pub fn from_result(result: &ExtractionResult) -> Self {
        match result.primary_record() {
            Some(record) => Self {
                file_name: result.file_name.clone(),
                topic: record.topic.clone(),
                venue: record.venue.clone(),
                date: record.date.clone(),
                time: record.time_or_na().to_string(),
                contact: record.contact_or_na().to_string(),
                mode: record.mode_or_empty().to_string(),
            },
            // パーサーを経由しない結果はレコード0件もありうる
            None => Self {
                file_name: result.file_name.clone(),
                topic: NOT_AVAILABLE.into(),
                venue: NOT_AVAILABLE.into(),
                date: NOT_AVAILABLE.into(),
                time: NOT_AVAILABLE.into(),
                contact: NOT_AVAILABLE.into(),
                mode: String::new(),
            },
        }
    }

    /// `COLUMNS` と同じ順のセル
    pub fn cells(&self) -> [&str; 7] {
        [
            self.file_name.as_str(),
            self.topic.as_str(),
            self.venue.as_str(),
            self.date.as_str(),
            self.time.as_str(),
            self.contact.as_str(),
            self.mode.as_str(),
        ]
    }
}

pub fn rows(results: &[ExtractionResult]) -> Vec<ResultRow> {
    results.iter().map(ResultRow::from_result).collect()
}
