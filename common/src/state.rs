//! バッチ状態とリデューサー
//!
//! `BatchState` は不変値として扱い、イベントごとに `reduce` で丸ごと置き換える。
//! I/Oは一切行わない。実際のアップロードは呼び出し側が `BatchTicket` を受け取って実行し、
//! 完了後に `BatchEvent::Settled` を戻す。
//!
//! ```text
//! Idle ──Submit──▶ InFlight ──Settled(Ok)──▶ Completed
//!   ▲                 │
//!   └──Settled(Err)───┘
//! ```

use crate::selection::ImageSelection;
use crate::types::{ExtractionResult, ImageBlob};
use std::fmt;
use thiserror::Error;

/// 1リクエストの失敗理由
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP status {code}: {body}")]
    Status { code: u16, body: String },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("service returned no records")]
    NoRecords,

    #[error("request did not report a result")]
    Incomplete,
}

impl From<crate::error::Error> for FailureKind {
    fn from(err: crate::error::Error) -> Self {
        match err {
            crate::error::Error::NoRecords => FailureKind::NoRecords,
            other => FailureKind::MalformedPayload(other.to_string()),
        }
    }
}

/// バッチ全体の失敗（最初に失敗した画像を指す）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub index: Option<usize>,
    pub file_name: Option<String>,
    pub kind: FailureKind,
}

impl BatchFailure {
    pub fn at(index: usize, file_name: impl Into<String>, kind: FailureKind) -> Self {
        Self {
            index: Some(index),
            file_name: Some(file_name.into()),
            kind,
        }
    }

    pub fn batch(kind: FailureKind) -> Self {
        Self {
            index: None,
            file_name: None,
            kind,
        }
    }
}

impl fmt::Display for BatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file_name, self.index) {
            (Some(name), Some(index)) => write!(f, "{} (#{}): {}", name, index + 1, self.kind),
            (Some(name), None) => write!(f, "{}: {}", name, self.kind),
            (None, Some(index)) => write!(f, "#{}: {}", index + 1, self.kind),
            (None, None) => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for BatchFailure {}

/// バッチの結果（未実行 / 実行中 / 成功 / 失敗）
#[derive(Debug, Clone, Default, PartialEq)]
pub enum BatchOutcome {
    #[default]
    NotStarted,
    Pending,
    Success(Vec<ExtractionResult>),
    Failed(BatchFailure),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPhase {
    Idle,
    InFlight,
    Completed,
}

impl BatchPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchPhase::Idle => "idle",
            BatchPhase::InFlight => "in-flight",
            BatchPhase::Completed => "completed",
        }
    }
}

/// 送信時点の選択スナップショット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchTicket {
    pub batch_id: u64,
    pub images: Vec<ImageBlob>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    AddImages(Vec<ImageBlob>),
    RemoveImage(usize),
    Submit,
    Settled {
        batch_id: u64,
        result: Result<Vec<ExtractionResult>, BatchFailure>,
    },
}

/// 画面に渡す状態一式
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchState {
    selection: ImageSelection,
    outcome: BatchOutcome,
    batch_seq: u64,
    ticket: Option<BatchTicket>,
}

impl BatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reduce(mut self, event: BatchEvent) -> Self {
        match event {
            BatchEvent::AddImages(files) => {
                self.selection.add(files);
                self
            }
            BatchEvent::RemoveImage(index) => {
                self.selection.remove(index);
                self
            }
            BatchEvent::Submit => {
                if !self.can_submit() {
                    return self;
                }
                self.batch_seq += 1;
                self.ticket = Some(BatchTicket {
                    batch_id: self.batch_seq,
                    images: self.selection.blobs(),
                });
                self.outcome = BatchOutcome::Pending;
                self
            }
            BatchEvent::Settled { batch_id, result } => {
                if !self.is_loading() || batch_id != self.batch_seq {
                    return self;
                }
                let expected = self.ticket.take().map(|t| t.images.len()).unwrap_or(0);
                self.outcome = match result {
                    Ok(results) if results.len() == expected => BatchOutcome::Success(results),
                    Ok(_) => BatchOutcome::Failed(BatchFailure::batch(FailureKind::Incomplete)),
                    Err(failure) => BatchOutcome::Failed(failure),
                };
                self
            }
        }
    }

    pub fn selection(&self) -> &ImageSelection {
        &self.selection
    }

    pub fn outcome(&self) -> &BatchOutcome {
        &self.outcome
    }

    pub fn phase(&self) -> BatchPhase {
        match self.outcome {
            BatchOutcome::NotStarted | BatchOutcome::Failed(_) => BatchPhase::Idle,
            BatchOutcome::Pending => BatchPhase::InFlight,
            BatchOutcome::Success(_) => BatchPhase::Completed,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase() == BatchPhase::InFlight
    }

    pub fn can_submit(&self) -> bool {
        !self.selection.is_empty() && !self.is_loading()
    }

    /// 成功したバッチの結果。それ以外は空
    pub fn results(&self) -> &[ExtractionResult] {
        match &self.outcome {
            BatchOutcome::Success(results) => results,
            _ => &[],
        }
    }

    pub fn failure(&self) -> Option<&BatchFailure> {
        match &self.outcome {
            BatchOutcome::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// 実行中のバッチ
    pub fn pending_batch(&self) -> Option<&BatchTicket> {
        if self.is_loading() {
            self.ticket.as_ref()
        } else {
            None
        }
    }

    pub fn batch_seq(&self) -> u64 {
        self.batch_seq
    }
}

/// 添字ごとのスロットを全か無かで結合する
///
/// 失敗は送信順で最初のものを返す。埋まっていないスロットは `Incomplete`。
pub fn assemble_batch(
    slots: Vec<Option<Result<ExtractionResult, BatchFailure>>>,
) -> Result<Vec<ExtractionResult>, BatchFailure> {
    let mut results = Vec::with_capacity(slots.len());
    for (index, slot) in slots.into_iter().enumerate() {
        match slot {
            Some(Ok(result)) => results.push(result),
            Some(Err(failure)) => return Err(failure),
            None => {
                return Err(BatchFailure {
                    index: Some(index),
                    file_name: None,
                    kind: FailureKind::Incomplete,
                })
            }
        }
    }
    Ok(results)
}
