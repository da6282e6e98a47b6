use crate::core::aggregate::Chart;
use crate::errors::AppResult;
use std::io::Write;

/// Pretty JSON array of `{ "date": ..., "<category>": hours }` objects.
pub fn write_chart_json<W: Write>(mut out: W, chart: &Chart) -> AppResult<()> {
    serde_json::to_writer_pretty(&mut out, &chart.to_json_rows())?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
