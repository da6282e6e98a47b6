//! Chart data export (CSV / JSON), to a file or stdout.

mod csv;
mod fs_utils;
mod json;

pub use self::csv::write_chart_csv;
pub use self::json::write_chart_json;

use crate::core::aggregate::Chart;
use crate::errors::AppResult;
use crate::ui::messages::success;
use clap::ValueEnum;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Helper for export completion messages.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Table,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Table => "table",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

fn write_to<W: Write>(out: W, chart: &Chart, format: ExportFormat) -> AppResult<()> {
    match format {
        ExportFormat::Csv => write_chart_csv(out, chart),
        ExportFormat::Json => write_chart_json(out, chart),
        ExportFormat::Table => {
            let mut out = out;
            out.write_all(crate::ui::chart::render_chart_table(chart).as_bytes())?;
            Ok(())
        }
    }
}

/// Write `chart` to `file` (asking before overwriting unless `force`),
/// or to stdout when no file is given.
pub fn export_chart(
    chart: &Chart,
    format: ExportFormat,
    file: Option<&str>,
    force: bool,
) -> AppResult<()> {
    match file {
        Some(f) => {
            let path = Path::new(f);
            fs_utils::ensure_writable(path, force)?;
            let writer = BufWriter::new(File::create(path)?);
            write_to(writer, chart, format)?;
            notify_export_success(&format.as_str().to_uppercase(), path);
            Ok(())
        }
        None => write_to(io::stdout().lock(), chart, format),
    }
}
