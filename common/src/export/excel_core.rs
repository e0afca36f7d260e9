//! Excel生成（共通ライブラリ）
//!
//! 1シート、見出し行 + 1結果1行の一覧表

use crate::error::{Error, Result};
use crate::table::{ResultRow, COLUMNS};
use rust_xlsxwriter::*;

/// 列幅（文字数）
const COLUMN_WIDTHS: [f64; 7] = [24.0, 36.0, 28.0, 16.0, 12.0, 18.0, 12.0];

/// Excelをバッファに生成
///
/// # Arguments
/// * `rows` - 表示用の行データ（送信順）
/// * `sheet_name` - シート名（31文字以内、`[]:*?/\` 不可）
pub fn generate_excel_buffer(rows: &[ResultRow], sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_size(10.0)
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let value_format = Format::new()
        .set_font_size(11.0)
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|e| Error::Export(format!("シート名設定エラー: {}", e)))?;

    for (col, (label, width)) in COLUMNS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        worksheet
            .set_column_width(col, width)
            .map_err(|e| Error::Export(format!("列幅設定エラー: {}", e)))?;
        worksheet
            .write_string_with_format(0, col, *label, &header_format)
            .map_err(|e| Error::Export(format!("見出し書き込みエラー: {}", e)))?;
    }
    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| Error::Export(format!("ウィンドウ枠固定エラー: {}", e)))?;

    for (index, row) in rows.iter().enumerate() {
        let excel_row = index as u32 + 1;
        for (col, value) in row.cells().iter().enumerate() {
            worksheet
                .write_string_with_format(excel_row, col as u16, *value, &value_format)
                .map_err(|e| Error::Export(format!("値書き込みエラー: {}", e)))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| Error::Export(format!("Excel保存エラー: {}", e)))
}
