pub mod csv;
pub mod excel;
pub mod table;

use crate::cli::ExportFormat;
use crate::error::Result;
use ocr_extractor_common::table::rows;
use ocr_extractor_common::ExtractionResult;
use std::path::{Path, PathBuf};

/// `ocr-results-YYYYMMDD-HHMMSS.<ext>`
pub fn default_output_path(format: ExportFormat) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    PathBuf::from(format!("ocr-results-{}.{}", stamp, format.extension()))
}

pub fn write_results(results: &[ExtractionResult], format: ExportFormat, output_path: &Path) -> Result<()> {
    match format {
        ExportFormat::Table => {
            std::fs::write(output_path, table::render_table(&rows(results)))?;
        }
        ExportFormat::Json => {
            let json = serde_json::to_string_pretty(results)?;
            std::fs::write(output_path, json)?;
        }
        ExportFormat::Csv => csv::generate_csv(&rows(results), output_path)?,
        ExportFormat::Excel => excel::generate_excel(&rows(results), output_path)?,
    }
    Ok(())
}

/// 書き出したファイルのパスを返す。tableで出力先が無ければ書き出さない
pub fn export_results(
    results: &[ExtractionResult],
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<Option<PathBuf>> {
    let output_path = match (format, output) {
        (ExportFormat::Table, None) => return Ok(None),
        (_, Some(path)) => path.to_path_buf(),
        (_, None) => default_output_path(format),
    };

    println!("- {}を生成中...", format);
    write_results(results, format, &output_path)?;
    println!("✔ 出力: {}", output_path.display());

    Ok(Some(output_path))
}
