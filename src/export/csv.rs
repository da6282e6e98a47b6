use crate::core::aggregate::Chart;
use crate::errors::AppResult;
use csv::Writer;
use std::io::Write;

/// One line per date, one column per category (hours, 2 decimals).
pub fn write_chart_csv<W: Write>(out: W, chart: &Chart) -> AppResult<()> {
    let mut wtr = Writer::from_writer(out);

    let mut header = vec!["date".to_string()];
    header.extend(chart.categories.iter().cloned());
    wtr.write_record(&header)?;

    for row in &chart.rows {
        let mut record = vec![row.date.clone()];
        record.extend(row.hours.iter().map(|h| format!("{h:.2}")));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
