//! 画像選択
//!
//! 選択された画像とプレビューハンドルを同じ順序で保持する。
//! ハンドルは単調増加のIDで、削除後に再利用されることはない。

use crate::types::ImageBlob;
use std::fmt;

/// プレビュー参照
///
/// 実体（サムネイル等）は表示層が所有し、このハンドルで引く
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PreviewHandle(u64);

impl PreviewHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "preview-{}", self.0)
    }
}

/// 選択中の1画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub blob: ImageBlob,
    pub preview: PreviewHandle,
}

/// 選択中の画像リスト（順序付き、重複可）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSelection {
    entries: Vec<SelectedImage>,
    next_preview: u64,
}

impl ImageSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 末尾に追加（重複排除・検証なし）
    pub fn add(&mut self, files: impl IntoIterator<Item = ImageBlob>) {
        for blob in files {
            let preview = PreviewHandle(self.next_preview);
            self.next_preview += 1;
            self.entries.push(SelectedImage { blob, preview });
        }
    }

    /// 指定位置を削除。範囲外は何もしない
    pub fn remove(&mut self, index: usize) -> Option<SelectedImage> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SelectedImage> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectedImage> {
        self.entries.iter()
    }

    /// 画像のスナップショット
    pub fn blobs(&self) -> Vec<ImageBlob> {
        self.entries.iter().map(|e| e.blob.clone()).collect()
    }

    pub fn previews(&self) -> impl Iterator<Item = PreviewHandle> + '_ {
        self.entries.iter().map(|e| e.preview)
    }

    pub fn file_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.blob.name.as_str()).collect()
    }
}
