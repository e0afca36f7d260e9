//! オーケストレーターの統合テスト
//!
//! 応答順がばらばらな偽の抽出サービスで、送信順の結合と全件成功/全件失敗を検証

use async_trait::async_trait;
use ocr_extractor::client::ExtractionService;
use ocr_extractor::orchestrator::{run_batch, Orchestrator};
use ocr_extractor_common::{
    BatchPhase, ExtractedRecord, ExtractionPayload, FailureKind, ImageBlob,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
struct FakeService {
    delays_ms: HashMap<String, u64>,
    failing: HashSet<String>,
    calls: AtomicUsize,
    completed: Mutex<Vec<String>>,
}

impl FakeService {
    fn with_delays(delays: &[(&str, u64)]) -> Self {
        Self {
            delays_ms: delays.iter().map(|(n, d)| (n.to_string(), *d)).collect(),
            ..Default::default()
        }
    }

    fn failing(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExtractionService for FakeService {
    async fn extract(&self, image: &ImageBlob) -> Result<ExtractionPayload, FailureKind> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let delay = self.delays_ms.get(&image.name).copied().unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        self.completed.lock().unwrap().push(image.name.clone());

        if self.failing.contains(&image.name) {
            return Err(FailureKind::Status {
                code: 500,
                body: "internal error".to_string(),
            });
        }

        Ok(ExtractionPayload {
            extracted_data: vec![ExtractedRecord {
                topic: format!("topic of {}", image.name),
                venue: "Hall".to_string(),
                date: "2026-10-14".to_string(),
                ..Default::default()
            }],
            extra: Default::default(),
        })
    }
}

fn blobs(names: &[&str]) -> Vec<ImageBlob> {
    names
        .iter()
        .map(|n| ImageBlob::new(*n, n.as_bytes().to_vec()))
        .collect()
}

/// A=60ms, B=120ms, C=5ms（完了順は C, A, B）
fn staggered() -> FakeService {
    FakeService::with_delays(&[("A.png", 60), ("B.png", 120), ("C.png", 5)])
}

#[tokio::test]
async fn test_results_follow_submission_order() {
    let mut orchestrator = Orchestrator::new(staggered());
    orchestrator.add_images(blobs(&["A.png", "B.png", "C.png"]));

    let phase = orchestrator.submit().await;
    assert_eq!(phase, BatchPhase::Completed);

    // 完了順は送信順と異なる
    assert_eq!(orchestrator.service().completed(), vec!["C.png", "A.png", "B.png"]);

    let names: Vec<&str> = orchestrator
        .state()
        .results()
        .iter()
        .map(|r| r.file_name.as_str())
        .collect();
    assert_eq!(names, vec!["A.png", "B.png", "C.png"]);
    assert_eq!(
        orchestrator.state().results()[1].payload.extracted_data[0].topic,
        "topic of B.png"
    );
    assert!(!orchestrator.state().is_loading());
}

#[tokio::test]
async fn test_one_failure_fails_whole_batch() {
    let mut orchestrator = Orchestrator::new(staggered().failing("B.png"));
    orchestrator.add_images(blobs(&["A.png", "B.png", "C.png"]));

    let phase = orchestrator.submit().await;
    assert_eq!(phase, BatchPhase::Idle);

    let state = orchestrator.state();
    assert!(state.results().is_empty());
    assert!(!state.is_loading());

    let failure = state.failure().expect("失敗が記録されるべき");
    assert_eq!(failure.index, Some(1));
    assert_eq!(failure.file_name.as_deref(), Some("B.png"));
    assert!(matches!(failure.kind, FailureKind::Status { code: 500, .. }));

    // 他のリクエストも最後まで実行される
    assert_eq!(orchestrator.service().calls(), 3);
    // 選択は残る
    assert_eq!(state.selection().len(), 3);
}

#[tokio::test]
async fn test_first_failure_by_index_is_reported() {
    let service = staggered().failing("A.png").failing("C.png");
    let mut orchestrator = Orchestrator::new(service);
    orchestrator.add_images(blobs(&["A.png", "B.png", "C.png"]));

    orchestrator.submit().await;

    // C が先に失敗するが、添字の小さい A を報告
    let failure = orchestrator.state().failure().unwrap();
    assert_eq!(failure.file_name.as_deref(), Some("A.png"));
}

#[tokio::test]
async fn test_empty_selection_sends_nothing() {
    let mut orchestrator = Orchestrator::new(FakeService::default());

    let phase = orchestrator.submit().await;
    assert_eq!(phase, BatchPhase::Idle);
    assert_eq!(orchestrator.service().calls(), 0);
    assert!(orchestrator.state().failure().is_none());
    assert_eq!(orchestrator.state().batch_seq(), 0);
}

#[tokio::test]
async fn test_submit_while_in_flight_is_ignored() {
    let mut orchestrator = Orchestrator::new(staggered());
    orchestrator.add_images(blobs(&["A.png", "B.png"]));

    let ticket = orchestrator.begin_submit().expect("最初の送信はチケットを返す");
    assert!(orchestrator.state().is_loading());
    assert!(orchestrator.begin_submit().is_none());

    let event = run_batch(orchestrator.service(), ticket).await;
    assert_eq!(orchestrator.finish(event), BatchPhase::Completed);
    assert_eq!(orchestrator.service().calls(), 2);
}

#[tokio::test]
async fn test_changes_during_flight_do_not_affect_batch() {
    let mut orchestrator = Orchestrator::new(staggered());
    orchestrator.add_images(blobs(&["A.png", "B.png"]));

    let ticket = orchestrator.begin_submit().unwrap();
    orchestrator.remove_image(0);
    orchestrator.add_images(blobs(&["C.png"]));

    let event = run_batch(orchestrator.service(), ticket).await;
    orchestrator.finish(event);

    let names: Vec<&str> = orchestrator
        .state()
        .results()
        .iter()
        .map(|r| r.file_name.as_str())
        .collect();
    assert_eq!(names, vec!["A.png", "B.png"]);
    assert_eq!(orchestrator.state().selection().file_names(), vec!["B.png", "C.png"]);
}

#[tokio::test]
async fn test_resubmit_after_success_starts_new_batch() {
    let mut orchestrator = Orchestrator::new(staggered());
    orchestrator.add_images(blobs(&["C.png"]));

    assert_eq!(orchestrator.submit().await, BatchPhase::Completed);
    orchestrator.add_images(blobs(&["A.png"]));
    assert_eq!(orchestrator.submit().await, BatchPhase::Completed);

    assert_eq!(orchestrator.state().batch_seq(), 2);
    assert_eq!(orchestrator.state().results().len(), 2);
    assert_eq!(orchestrator.service().calls(), 3);
}

#[test]
fn test_remove_out_of_range_is_noop() {
    let mut orchestrator = Orchestrator::new(FakeService::default());
    orchestrator.remove_image(0);
    assert!(orchestrator.state().selection().is_empty());

    orchestrator.add_images(blobs(&["A.png"]));
    orchestrator.remove_image(5);
    assert_eq!(orchestrator.state().selection().len(), 1);
}
