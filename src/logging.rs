//! ログ初期化
//!
//! 表の出力はstdout、診断ログはstderrに分ける

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` があれば優先、無ければ `info`（`--verbose` 時は `debug`）
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // テストなどで二重に呼ばれても失敗させない
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
