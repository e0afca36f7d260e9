use crate::error::{OcrError, Result};
use ocr_extractor_common::ImageBlob;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub path: PathBuf,
    pub file_name: String,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff"];

/// フォルダ内の画像を収集（ファイル名順）
pub fn scan_folder(folder: &Path, recursive: bool) -> Result<Vec<ImageFile>> {
    if !folder.is_dir() {
        return Err(OcrError::FolderNotFound(folder.display().to_string()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let is_image = path
            .extension()
            .map(|ext| is_image_extension(&ext.to_string_lossy()))
            .unwrap_or(false);
        if is_image {
            images.push(image_file(path));
        }
    }

    // フォルダごとにファイル名順
    images.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(images)
}

/// 引数のファイル・フォルダから画像を収集
///
/// ファイル指定は拡張子を問わず指定順のまま、フォルダは `scan_folder` の結果を展開する
pub fn collect_images(paths: &[PathBuf], recursive: bool) -> Result<Vec<ImageFile>> {
    let mut images = Vec::new();

    for path in paths {
        if path.is_dir() {
            images.extend(scan_folder(path, recursive)?);
        } else if path.is_file() {
            images.push(image_file(path));
        } else {
            return Err(OcrError::FileNotFound(path.display().to_string()));
        }
    }

    Ok(images)
}

pub fn load_blob(image: &ImageFile) -> Result<ImageBlob> {
    let bytes = std::fs::read(&image.path)?;
    Ok(ImageBlob::new(image.file_name.clone(), bytes))
}

pub fn load_blobs(images: &[ImageFile]) -> Result<Vec<ImageBlob>> {
    images.iter().map(load_blob).collect()
}

fn image_file(path: &Path) -> ImageFile {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    ImageFile {
        path: path.to_path_buf(),
        file_name,
    }
}

fn is_image_extension(ext: &str) -> bool {
    let lower = ext.to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&lower.as_str())
}
