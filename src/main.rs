use clap::Parser;
use ocr_extractor::{cli, client, config, display, error, export, logging, orchestrator, scanner, session};
use cli::{Cli, Commands};
use client::HttpExtractionClient;
use config::Config;
use error::{OcrError, Result};
use ocr_extractor_common::BatchPhase;
use orchestrator::Orchestrator;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Extract { paths, recursive, format, output } => {
            println!("🔎 ocr-extractor - 一括抽出\n");

            // 1. 画像収集
            println!("[1/3] 画像を収集中...");
            let images = scanner::collect_images(&paths, recursive)?;
            if images.is_empty() {
                let joined: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
                return Err(OcrError::NoImagesFound(joined.join(", ")));
            }
            let blobs = scanner::load_blobs(&images)?;
            println!("✔ {}枚の画像を検出\n", blobs.len());

            // 2. 抽出
            let service = HttpExtractionClient::from_config(&config, cli.endpoint.as_deref())?;
            println!("[2/3] 抽出中... ({})", service.endpoint());
            let mut orchestrator = Orchestrator::new(service);
            orchestrator.add_images(blobs);

            if display::submit_with_spinner(&mut orchestrator).await != BatchPhase::Completed {
                return match orchestrator.state().failure() {
                    Some(failure) => {
                        display::print_failure(failure);
                        Err(OcrError::BatchFailed(failure.clone()))
                    }
                    None => Err(OcrError::Config("抽出を開始できませんでした".into())),
                };
            }
            println!("✔ {}件の結果\n", orchestrator.state().results().len());
            display::print_results(orchestrator.state());

            // 3. 出力
            println!("\n[3/3] 出力中...");
            if export::export_results(orchestrator.state().results(), format, output.as_deref())?.is_none() {
                println!("- ファイル出力なし（-o で保存）");
            }

            println!("\n✅ 完了");
        }

        Commands::Session { paths, recursive } => {
            println!("🗂  ocr-extractor - 対話モード\n");

            let service = HttpExtractionClient::from_config(&config, cli.endpoint.as_deref())?;
            println!("エンドポイント: {}\n", service.endpoint());
            let mut orchestrator = Orchestrator::new(service);

            if !paths.is_empty() {
                let added = session::add_paths(&mut orchestrator, &paths, recursive)?;
                println!("✔ {}枚を追加\n", added);
            }

            session::run_session(&mut orchestrator, recursive).await?;
        }

        Commands::Config { set_endpoint, set_timeout, clear_timeout, show } => {
            let mut config = config;

            if let Some(endpoint) = set_endpoint {
                config.set_endpoint(endpoint)?;
                println!("✔ エンドポイントを設定しました");
            }

            if let Some(seconds) = set_timeout {
                config.set_timeout(Some(seconds))?;
                println!("✔ タイムアウトを{}秒に設定しました", seconds);
            } else if clear_timeout {
                config.set_timeout(None)?;
                println!("✔ タイムアウト設定を解除しました");
            }

            if show {
                println!("設定:");
                println!("  エンドポイント: {}", config.resolve_endpoint(cli.endpoint.as_deref()));
                println!("  フィールド名: {}", config.field_name);
                match config.timeout_seconds {
                    Some(seconds) => println!("  タイムアウト: {}秒", seconds),
                    None => println!("  タイムアウト: 未設定"),
                }
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}
