//! 対話モード
//!
//! 画像の追加・削除・送信・結果表示・書き出しを1つのセッションで行う。
//! 表示番号は1始まり、内部の添字は0始まり。

use crate::client::ExtractionService;
use crate::cli::ExportFormat;
use crate::display;
use crate::error::{OcrError, Result};
use crate::export;
use crate::orchestrator::Orchestrator;
use crate::preview::PreviewCache;
use crate::scanner;
use dialoguer::Input;
use ocr_extractor_common::BatchPhase;
use std::path::PathBuf;
use tracing::warn;

/// 入力コマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// 画像を追加
    Add(Vec<PathBuf>),
    /// 選択から削除（0始まり）
    Remove(usize),
    /// 選択一覧
    List,
    /// 一括抽出
    Submit,
    /// 結果表示
    Show,
    /// 結果を書き出し
    Export(PathBuf),
    Help,
    Quit,
    /// 空行
    Empty,
    /// 解釈できない入力（メッセージ付き）
    Invalid(String),
}

const HELP: &str = "\
操作:
  add <パス...>   画像ファイル/フォルダを追加
  rm <番号>       選択から削除
  ls              選択一覧
  submit          一括抽出
  show            結果表示
  export <ファイル> 結果を書き出し (.json/.csv/.xlsx/.txt)
  help            この説明
  quit            終了";

pub fn parse_command(line: &str) -> SessionCommand {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return SessionCommand::Empty;
    };
    let args: Vec<&str> = parts.collect();

    match head {
        "add" | "a" => {
            if args.is_empty() {
                SessionCommand::Invalid("add: パスを指定してください".into())
            } else {
                SessionCommand::Add(args.into_iter().map(PathBuf::from).collect())
            }
        }
        "rm" | "remove" => match args.as_slice() {
            [number] => match number.parse::<usize>() {
                Ok(n) if n >= 1 => SessionCommand::Remove(n - 1),
                _ => SessionCommand::Invalid(format!("rm: 1以上の番号を指定してください: {}", number)),
            },
            _ => SessionCommand::Invalid("rm: 番号を1つ指定してください".into()),
        },
        "ls" | "list" => SessionCommand::List,
        "submit" | "run" => SessionCommand::Submit,
        "show" | "results" => SessionCommand::Show,
        "export" => match args.as_slice() {
            [path] => SessionCommand::Export(PathBuf::from(path)),
            _ => SessionCommand::Invalid("export: 出力ファイルを1つ指定してください".into()),
        },
        "help" | "?" => SessionCommand::Help,
        "quit" | "q" | "exit" => SessionCommand::Quit,
        other => SessionCommand::Invalid(format!("不明なコマンド: {}（help で一覧）", other)),
    }
}

pub async fn run_session<S: ExtractionService>(
    orchestrator: &mut Orchestrator<S>,
    recursive: bool,
) -> Result<()> {
    let mut previews = PreviewCache::new();

    println!("{}\n", HELP);
    display::print_selection(orchestrator.state(), &mut previews);

    loop {
        let prompt = format!("ocr [{}]", display::status_line(orchestrator.state()));
        let input: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| OcrError::Interaction(e.to_string()))?;

        match parse_command(&input) {
            SessionCommand::Add(paths) => match add_paths(orchestrator, &paths, recursive) {
                Ok(added) => {
                    println!("✔ {}枚を追加", added);
                    display::print_selection(orchestrator.state(), &mut previews);
                }
                Err(e) => println!("✖ {}", e),
            },
            SessionCommand::Remove(index) => {
                let before = orchestrator.state().selection().len();
                orchestrator.remove_image(index);
                if orchestrator.state().selection().len() == before {
                    println!("番号 {} の画像はありません", index + 1);
                }
                display::print_selection(orchestrator.state(), &mut previews);
            }
            SessionCommand::List => display::print_selection(orchestrator.state(), &mut previews),
            SessionCommand::Submit => {
                if !orchestrator.state().can_submit() {
                    println!("送信する画像がありません");
                    continue;
                }
                match display::submit_with_spinner(orchestrator).await {
                    BatchPhase::Completed => display::print_results(orchestrator.state()),
                    _ => {
                        if let Some(failure) = orchestrator.state().failure() {
                            display::print_failure(failure);
                        }
                    }
                }
            }
            SessionCommand::Show => {
                if orchestrator.state().results().is_empty() {
                    println!("表示できる結果はありません");
                } else {
                    display::print_results(orchestrator.state());
                }
            }
            SessionCommand::Export(path) => {
                let results = orchestrator.state().results();
                if results.is_empty() {
                    println!("書き出す結果がありません");
                    continue;
                }
                let format = ExportFormat::from_path(&path).unwrap_or(ExportFormat::Json);
                if let Err(e) = export::export_results(results, format, Some(&path)) {
                    warn!(error = %e, path = %path.display(), "書き出しに失敗");
                    println!("✖ {}", e);
                }
            }
            SessionCommand::Help => println!("{}", HELP),
            SessionCommand::Quit => break,
            SessionCommand::Empty => {}
            SessionCommand::Invalid(message) => println!("{}", message),
        }
    }

    Ok(())
}

/// 追加した枚数を返す
pub fn add_paths<S: ExtractionService>(
    orchestrator: &mut Orchestrator<S>,
    paths: &[PathBuf],
    recursive: bool,
) -> Result<usize> {
    let images = scanner::collect_images(paths, recursive)?;
    let blobs = scanner::load_blobs(&images)?;
    let added = blobs.len();
    orchestrator.add_images(blobs);
    Ok(added)
}
