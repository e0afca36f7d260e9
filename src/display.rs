//! 端末表示
//!
//! 選択一覧（プレビュー付き）、実行中スピナー、結果表、失敗通知

use crate::client::ExtractionService;
use crate::export::table::render_table;
use crate::orchestrator::{run_batch, Orchestrator};
use crate::preview::PreviewCache;
use indicatif::{ProgressBar, ProgressStyle};
use ocr_extractor_common::table::rows;
use ocr_extractor_common::{BatchFailure, BatchPhase, BatchState};
use std::time::Duration;

pub fn busy_spinner(images: usize) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("{}枚を抽出中...", images));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// スピナーを出しながら送信。送信できない状態なら何もしない
pub async fn submit_with_spinner<S: ExtractionService>(orchestrator: &mut Orchestrator<S>) -> BatchPhase {
    let Some(ticket) = orchestrator.begin_submit() else {
        return orchestrator.state().phase();
    };

    let spinner = busy_spinner(ticket.images.len());
    let event = run_batch(orchestrator.service(), ticket).await;
    spinner.finish_and_clear();

    orchestrator.finish(event)
}

/// 1始まりの番号で選択一覧を表示
pub fn print_selection(state: &BatchState, previews: &mut PreviewCache) {
    let selection = state.selection();
    previews.sync(selection);

    if selection.is_empty() {
        println!("（画像が選択されていません）");
        return;
    }

    println!("選択中の画像: {}枚", selection.len());
    for (index, entry) in selection.iter().enumerate() {
        let info = previews.resolve(entry.preview, &entry.blob);
        println!("  [{}] {} ({})", index + 1, entry.blob.name, info.describe());
    }
}

pub fn print_results(state: &BatchState) {
    let results = state.results();
    if results.is_empty() {
        return;
    }
    print!("{}", render_table(&rows(results)));
}

pub fn print_failure(failure: &BatchFailure) {
    println!("✖ 抽出に失敗しました（結果は表示されません）: {}", failure);
}

/// 現在の状態を1行で
pub fn status_line(state: &BatchState) -> String {
    match state.phase() {
        BatchPhase::Idle if state.failure().is_some() => "待機中（前回のバッチは失敗）".to_string(),
        BatchPhase::Idle => "待機中".to_string(),
        BatchPhase::InFlight => "抽出中".to_string(),
        BatchPhase::Completed => format!("完了（{}件）", state.results().len()),
    }
}
