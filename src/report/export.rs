use std::io::Write;

use anyhow::{Context, Result};

use crate::grid::PriceMatrix;

/// Write `matrix` as CSV: a `volatility,<spot>...` header, then one row per
/// volatility.
pub fn write_csv<W: Write>(matrix: &PriceMatrix, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["volatility".to_string()];
    header.extend(matrix.spots().iter().map(|spot| spot.to_string()));
    wtr.write_record(&header)
        .context("Failed to write CSV header")?;

    for (vol, row) in matrix.volatilities().iter().zip(matrix.rows()) {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(vol.to_string());
        record.extend(row.iter().map(|value| value.to_string()));
        wtr.write_record(&record)
            .with_context(|| format!("Failed to write CSV row for volatility {}", vol))?;
    }

    wtr.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// CSV text of `matrix`.
pub fn to_csv_string(matrix: &PriceMatrix) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(matrix, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}
