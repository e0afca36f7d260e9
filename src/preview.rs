//! プレビュー解決
//!
//! `PreviewHandle` の実体は表示層（ここ）が持つ。
//! 画像ヘッダだけを読んで形式とサイズを得る。選択から外れたハンドルは `sync` で解放する。

use image::ImageReader;
use ocr_extractor_common::{ImageBlob, ImageSelection, PreviewHandle};
use std::collections::{HashMap, HashSet};
use std::io::Cursor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewInfo {
    pub format: Option<String>,
    pub dimensions: Option<(u32, u32)>,
    pub size_bytes: usize,
}

impl PreviewInfo {
    pub fn probe(blob: &ImageBlob) -> Self {
        let size_bytes = blob.len();
        let reader = match ImageReader::new(Cursor::new(&blob.bytes[..])).with_guessed_format() {
            Ok(reader) => reader,
            Err(_) => {
                return Self {
                    format: None,
                    dimensions: None,
                    size_bytes,
                }
            }
        };

        let format = reader
            .format()
            .and_then(|f| f.extensions_str().first().map(|ext| ext.to_string()));
        let dimensions = reader.into_dimensions().ok();

        Self {
            format,
            dimensions,
            size_bytes,
        }
    }

    /// 例: `640x480 png, 12.3 KB`
    pub fn describe(&self) -> String {
        let shape = match (self.dimensions, self.format.as_deref()) {
            (Some((w, h)), Some(fmt)) => format!("{}x{} {}", w, h, fmt),
            (Some((w, h)), None) => format!("{}x{}", w, h),
            (None, Some(fmt)) => format!("{} (サイズ不明)", fmt),
            (None, None) => "不明な形式".to_string(),
        };
        format!("{}, {}", shape, format_size(self.size_bytes))
    }
}

fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[derive(Debug, Default)]
pub struct PreviewCache {
    entries: HashMap<PreviewHandle, PreviewInfo>,
}

impl PreviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, handle: PreviewHandle, blob: &ImageBlob) -> &PreviewInfo {
        self.entries
            .entry(handle)
            .or_insert_with(|| PreviewInfo::probe(blob))
    }

    /// 選択に残っていないハンドルを解放し、解放数を返す
    pub fn sync(&mut self, selection: &ImageSelection) -> usize {
        let live: HashSet<PreviewHandle> = selection.previews().collect();
        let before = self.entries.len();
        self.entries.retain(|handle, _| live.contains(handle));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
