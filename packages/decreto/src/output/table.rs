//! Console table rendering.

use textwrap::core::display_width;

use crate::config::{COLUMN_HEADERS, TRUNCATION_MARKER};
use crate::types::ProvisionRecord;

/// Cut `cell` to at most `width` display columns, marking the cut.
fn truncate_cell(cell: &str, width: usize) -> String {
    if display_width(cell) <= width {
        return cell.to_string();
    }

    let budget = width.saturating_sub(display_width(TRUNCATION_MARKER));
    let mut truncated = String::new();
    let mut used = 0;
    let mut buf = [0u8; 4];
    for ch in cell.chars() {
        let w = display_width(ch.encode_utf8(&mut buf));
        if used + w > budget {
            break;
        }
        used += w;
        truncated.push(ch);
    }
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}

/// Left-align `cell` within `width` display columns.
fn pad_cell(cell: &str, width: usize) -> String {
    let padding = width.saturating_sub(display_width(cell));
    format!("{cell}{}", " ".repeat(padding))
}

/// Column widths: widest cell or header, capped at `max_width`.
fn column_widths(rows: &[[String; 10]], max_width: usize) -> [usize; 10] {
    let mut widths = COLUMN_HEADERS.map(display_width);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(display_width(cell));
        }
    }
    widths.map(|w| w.min(max_width))
}

/// Render records as an aligned console table.
///
/// Each column is as wide as its widest cell, capped at `max_width`
/// display columns; longer cells are truncated with `...`.
#[must_use]
pub fn render_table(records: &[ProvisionRecord], max_width: usize) -> String {
    let rows: Vec<[String; 10]> = records.iter().map(ProvisionRecord::to_row).collect();
    let widths = column_widths(&rows, max_width);

    let format_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| pad_cell(&truncate_cell(cell, width), width))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    let header: Vec<String> = COLUMN_HEADERS.iter().map(|h| (*h).to_string()).collect();
    let separator = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("+");

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(&header));
    lines.push(separator);
    lines.extend(rows.iter().map(|row| format_row(row)));
    lines.join("\n")
}
