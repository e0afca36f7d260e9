//! HTTP抽出クライアント
//!
//! 画像1枚につき1回、multipartで固定エンドポイントへPOSTする

use super::ExtractionService;
use crate::config::Config;
use crate::error::Result;
use async_trait::async_trait;
use ocr_extractor_common::{parse_extraction_response, ExtractionPayload, FailureKind, ImageBlob};
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::debug;

/// ログ・エラーに含めるレスポンスボディの最大文字数
const BODY_PREVIEW_CHARS: usize = 200;

pub struct HttpExtractionClient {
    client: reqwest::Client,
    endpoint: String,
    field_name: String,
}

impl HttpExtractionClient {
    pub fn new(
        endpoint: impl Into<String>,
        field_name: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
            field_name: field_name.into(),
        })
    }

    pub fn from_config(config: &Config, endpoint_override: Option<&str>) -> Result<Self> {
        let endpoint = config.resolve_endpoint(endpoint_override);
        crate::config::validate_endpoint(&endpoint)?;
        Self::new(endpoint, config.field_name.clone(), config.timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_form(&self, image: &ImageBlob) -> std::result::Result<Form, FailureKind> {
        let part = Part::bytes(image.bytes.to_vec())
            .file_name(image.name.clone())
            .mime_str(image.mime_type())
            .map_err(|e| FailureKind::Transport(e.to_string()))?;

        Ok(Form::new().part(self.field_name.clone(), part))
    }
}

#[async_trait]
impl ExtractionService for HttpExtractionClient {
    async fn extract(&self, image: &ImageBlob) -> std::result::Result<ExtractionPayload, FailureKind> {
        let form = self.build_form(image)?;

        debug!(file = %image.name, bytes = image.len(), endpoint = %self.endpoint, "アップロード開始");

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| FailureKind::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FailureKind::Transport(e.to_string()))?;

        debug!(file = %image.name, status = status.as_u16(), body = %truncate_text(&body, BODY_PREVIEW_CHARS), "レスポンス受信");

        if !status.is_success() {
            return Err(FailureKind::Status {
                code: status.as_u16(),
                body: truncate_text(&body, BODY_PREVIEW_CHARS),
            });
        }

        parse_extraction_response(&body).map_err(FailureKind::from)
    }
}

/// 長いテキストを文字数で切り詰め
fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
