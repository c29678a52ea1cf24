use crate::error::Result;
use crate::flux::{FluxSeries, SECONDS_PER_DAY};
use csv::{Writer, WriterBuilder};
use serde::Serialize;
use std::fs::File;
use std::path::Path;

// One row of an exported flux series
#[derive(Debug, Serialize)]
struct FluxRecord<'a> {
    run: &'a str,
    time_days: f64,
    volumetric_flux: f64,
    cumulative_volume: f64,
}

// Create CSV writer with headers
pub fn create_csv_writer(path: impl AsRef<Path>) -> Result<Writer<File>> {
    let wtr = WriterBuilder::new().has_headers(true).from_path(path)?;
    Ok(wtr)
}

/// Write one or more labelled flux series as long-format rows.
pub fn write_flux_csv(path: impl AsRef<Path>, runs: &[(&str, &FluxSeries)]) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = create_csv_writer(path)?;

    let mut rows = 0;
    for (run, series) in runs {
        for i in 0..series.len() {
            wtr.serialize(FluxRecord {
                run,
                time_days: series.time[i] / SECONDS_PER_DAY,
                volumetric_flux: series.volumetric_flux[i],
                cumulative_volume: series.cumulative_volume[i],
            })?;
            rows += 1;
        }
    }
    wtr.flush()?;

    log::info!("Wrote {} flux records to {:?}", rows, path);
    Ok(())
}
