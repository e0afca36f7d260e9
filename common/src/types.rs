//! 抽出結果の型定義
//!
//! - ImageBlob: ユーザーが選択した画像（名前 + バイト列）
//! - ExtractedRecord: 抽出サービスが返す構造化レコード
//! - ExtractionPayload: 1リクエスト分のレスポンスボディ
//! - ExtractionResult: レスポンス + 元ファイル名

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::Arc;

/// 任意フィールドが無い場合の表示値
pub const NOT_AVAILABLE: &str = "N/A";

/// 選択された画像
///
/// バイト列は `Arc` で共有するので、状態のスナップショットを取っても複製されない
#[derive(Clone, PartialEq, Eq)]
pub struct ImageBlob {
    pub name: String,
    pub bytes: Arc<[u8]>,
}

impl ImageBlob {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 小文字の拡張子
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.name.rsplit_once('.')?;
        if ext.is_empty() {
            None
        } else {
            Some(ext.to_ascii_lowercase())
        }
    }

    /// 拡張子からMIMEタイプを推定
    pub fn mime_type(&self) -> &'static str {
        match self.extension().as_deref() {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            Some("bmp") => "image/bmp",
            Some("tif") | Some("tiff") => "image/tiff",
            _ => "application/octet-stream",
        }
    }
}

impl fmt::Debug for ImageBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageBlob")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// 抽出された1件のイベント情報
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub topic: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub venue: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,

    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// 電話番号など
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,

    /// 開催形式（オンライン/対面など）
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl ExtractedRecord {
    pub fn time_or_na(&self) -> &str {
        self.time.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn contact_or_na(&self) -> &str {
        self.contact.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn mode_or_empty(&self) -> &str {
        self.mode.as_deref().unwrap_or("")
    }
}

/// null・空文字・空白のみは未設定として扱う
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// null・欠落は空文字（セルは空欄で表示）
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// 抽出サービスのレスポンスボディ
///
/// `extracted_data` 以外のトップレベルフィールドは `extra` にそのまま保持する
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionPayload {
    pub extracted_data: Vec<ExtractedRecord>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// 1画像分の抽出結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub file_name: String,

    #[serde(flatten)]
    pub payload: ExtractionPayload,
}

impl ExtractionResult {
    pub fn new(file_name: impl Into<String>, payload: ExtractionPayload) -> Self {
        Self {
            file_name: file_name.into(),
            payload,
        }
    }

    /// 表示に使う先頭レコード（無ければNone）
    pub fn primary_record(&self) -> Option<&ExtractedRecord> {
        self.payload.extracted_data.first()
    }
}
