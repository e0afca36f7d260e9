//! バッチ抽出オーケストレーター
//!
//! ## 流れ
//!
//! ```text
//! begin_submit (Submit を適用し BatchTicket を受け取る)
//!     ↓
//! run_batch   (画像ごとに1リクエスト、全件の完了を待つ)
//!     ↓
//! finish      (Settled を適用)
//! ```
//!
//! 状態は `BatchState` を丸ごと置き換えて更新する。
//! リクエストは添字付きで同時に発行し、完了順に関係なく自分の添字のスロットへ書き込む。
//! スロットは全リクエストが終わってから読む。

use crate::client::ExtractionService;
use futures::stream::{FuturesUnordered, StreamExt};
use ocr_extractor_common::{
    assemble_batch, BatchEvent, BatchFailure, BatchPhase, BatchState, BatchTicket,
    ExtractionResult, ImageBlob,
};
use tracing::{debug, error, info};

pub struct Orchestrator<S> {
    service: S,
    state: BatchState,
}

impl<S: ExtractionService> Orchestrator<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: BatchState::new(),
        }
    }

    pub fn state(&self) -> &BatchState {
        &self.state
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn dispatch(&mut self, event: BatchEvent) {
        let previous = std::mem::take(&mut self.state);
        self.state = previous.reduce(event);
    }

    pub fn add_images(&mut self, files: Vec<ImageBlob>) {
        self.dispatch(BatchEvent::AddImages(files));
    }

    pub fn remove_image(&mut self, index: usize) {
        self.dispatch(BatchEvent::RemoveImage(index));
    }

    /// 新しいバッチが始まった場合だけチケットを返す
    ///
    /// 選択が空、または実行中のバッチがある場合は `None`（何も送信しない）
    pub fn begin_submit(&mut self) -> Option<BatchTicket> {
        let before = self.state.batch_seq();
        self.dispatch(BatchEvent::Submit);

        if self.state.batch_seq() == before {
            debug!(
                phase = self.state.phase().as_str(),
                selected = self.state.selection().len(),
                "送信をスキップ"
            );
            return None;
        }

        self.state.pending_batch().cloned()
    }

    pub fn finish(&mut self, event: BatchEvent) -> BatchPhase {
        if let BatchEvent::Settled { batch_id, result } = &event {
            match result {
                Ok(results) => info!(batch_id, results = results.len(), "一括抽出が完了"),
                Err(failure) => error!(batch_id, %failure, "一括抽出に失敗"),
            }
        }

        self.dispatch(event);
        self.state.phase()
    }

    /// begin_submit → run_batch → finish
    pub async fn submit(&mut self) -> BatchPhase {
        let Some(ticket) = self.begin_submit() else {
            return self.state.phase();
        };

        let event = run_batch(&self.service, ticket).await;
        self.finish(event)
    }
}

/// チケットの全画像を同時に抽出し、送信順に結合した `Settled` を返す
///
/// 同時実行数の上限・リトライ・キャンセルは無い。1件でも失敗すれば全体が失敗。
pub async fn run_batch<S>(service: &S, ticket: BatchTicket) -> BatchEvent
where
    S: ExtractionService + ?Sized,
{
    let BatchTicket { batch_id, images } = ticket;
    info!(batch_id, images = images.len(), "一括抽出を開始");

    let mut slots: Vec<Option<Result<ExtractionResult, BatchFailure>>> =
        (0..images.len()).map(|_| None).collect();

    let mut tasks: FuturesUnordered<_> = images
        .iter()
        .enumerate()
        .map(|(index, image)| async move {
            let outcome = service
                .extract(image)
                .await
                .map(|payload| ExtractionResult::new(image.name.clone(), payload))
                .map_err(|kind| BatchFailure::at(index, image.name.clone(), kind));
            (index, outcome)
        })
        .collect();

    while let Some((index, outcome)) = tasks.next().await {
        match &outcome {
            Ok(result) => debug!(batch_id, index, file = %result.file_name, "抽出成功"),
            Err(failure) => debug!(batch_id, index, %failure, "抽出失敗"),
        }
        slots[index] = Some(outcome);
    }

    BatchEvent::Settled {
        batch_id,
        result: assemble_batch(slots),
    }
}
