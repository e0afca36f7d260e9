//! 抽出サービスとの境界
//!
//! オーケストレーターは `ExtractionService` だけに依存する。
//! 本番は `HttpExtractionClient`、テストでは任意の実装を差し込む。

mod http;

pub use http::HttpExtractionClient;

use async_trait::async_trait;
use ocr_extractor_common::{ExtractionPayload, FailureKind, ImageBlob};

#[async_trait]
pub trait ExtractionService: Send + Sync {
    /// 画像1枚を抽出する。失敗理由は状態に保存できる `FailureKind` で返す
    async fn extract(&self, image: &ImageBlob) -> Result<ExtractionPayload, FailureKind>;
}
