use crate::error::{OcrError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://ocr-3-9gmv.onrender.com/extract";
/// multipartのファイルフィールド名
pub const DEFAULT_FIELD_NAME: &str = "files";
pub const ENDPOINT_ENV: &str = "OCR_EXTRACTOR_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub field_name: String,
    /// 未設定ならHTTPクライアントの既定に任せる
    pub timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            field_name: DEFAULT_FIELD_NAME.into(),
            timeout_seconds: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| OcrError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("ocr-extractor").join("config.json"))
    }

    /// 優先順位: `--endpoint` > 環境変数 > 設定ファイル
    pub fn resolve_endpoint(&self, cli_override: Option<&str>) -> String {
        resolve_endpoint_with(self, cli_override, std::env::var(ENDPOINT_ENV).ok())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    pub fn set_endpoint(&mut self, endpoint: String) -> Result<()> {
        validate_endpoint(&endpoint)?;
        self.endpoint = endpoint;
        self.save()
    }

    pub fn set_timeout(&mut self, seconds: Option<u64>) -> Result<()> {
        if seconds == Some(0) {
            return Err(OcrError::Config("タイムアウトは1秒以上で指定してください".into()));
        }
        self.timeout_seconds = seconds;
        self.save()
    }
}

fn resolve_endpoint_with(config: &Config, cli_override: Option<&str>, env: Option<String>) -> String {
    if let Some(endpoint) = cli_override.filter(|s| !s.trim().is_empty()) {
        return endpoint.trim().to_string();
    }
    if let Some(endpoint) = env.filter(|s| !s.trim().is_empty()) {
        return endpoint.trim().to_string();
    }
    config.endpoint.clone()
}

pub fn validate_endpoint(endpoint: &str) -> Result<()> {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Ok(())
    } else {
        Err(OcrError::Config(format!(
            "エンドポイントは http:// または https:// で始めてください: {}",
            endpoint
        )))
    }
}
