//! Terminal rendering of the hours chart and its legend.

use crate::core::aggregate::{CategoryTotal, Chart};
use crate::models::Theme;
use crate::models::category::parse_hex_color;
use crate::utils::colors::{RESET, swatch};
use crate::utils::table::{Column, Table};

/// Table with one row per date and one column per category.
pub fn render_chart_table(chart: &Chart) -> String {
    if chart.rows.is_empty() {
        return "No tracked time yet.\n".to_string();
    }

    let mut columns = vec![Column::left("Date")];
    columns.extend(chart.categories.iter().map(|c| Column::right(c)));

    let mut table = Table::new(columns);
    for row in &chart.rows {
        let mut cells = vec![row.date.clone()];
        cells.extend(row.hours.iter().map(|h| format!("{h:.2}")));
        table.add_row(cells);
    }
    table.render()
}

/// Horizontal bars (one per category) scaled to the largest total.
pub fn render_legend(totals: &[CategoryTotal], theme: Theme, width: usize) -> String {
    let max = totals.iter().map(|t| t.milliseconds).max().unwrap_or(0);
    let label_w = totals
        .iter()
        .map(|t| crate::utils::formatting::display_width(&t.label))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for t in totals {
        let rgb = t.color.as_deref().and_then(parse_hex_color);
        let len = if max > 0 {
            ((t.milliseconds as f64 / max as f64) * width as f64).round() as usize
        } else {
            0
        };
        out.push_str(&format!(
            "{} {}{}{}\n",
            crate::utils::pad_right(&t.label, label_w),
            swatch(rgb, theme),
            "█".repeat(len),
            RESET
        ));
    }
    out
}
