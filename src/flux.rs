use crate::config::SedimentProperties;
use crate::error::{Result, VizError};

/// Seconds per day, used for the time axis of flux plots.
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Volumetric flux and cumulative transported volume at one grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct FluxSeries {
    /// Time [s]
    pub time: Vec<f64>,
    /// Volumetric flux [m3/m/s]
    pub volumetric_flux: Vec<f64>,
    /// Cumulative volume [m3/m]
    pub cumulative_volume: Vec<f64>,
}

impl FluxSeries {
    pub fn time_days(&self) -> Vec<f64> {
        self.time.iter().map(|t| t / SECONDS_PER_DAY).collect()
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Scale factor turning areal flux into volumetric flux.
///
/// Only the first time interval is used; sampling is assumed uniform.
pub fn volume_scale(time: &[f64], sediment: &SedimentProperties) -> Result<f64> {
    if time.len() < 2 {
        return Err(VizError::InsufficientSamples {
            required: 2,
            found: time.len(),
        });
    }
    let delta_t = time[1] - time[0];
    Ok(delta_t / (sediment.density * (1.0 - sediment.porosity)))
}

/// Convert an areal flux sample into volumetric flux and its running sum.
pub fn integrate_flux(qs: &[f64], time: &[f64], sediment: &SedimentProperties) -> Result<FluxSeries> {
    let scale = volume_scale(time, sediment)?;
    scale_flux(qs, time, scale)
}

/// Like [`integrate_flux`], with the volume scale of another run.
pub fn scale_flux(qs: &[f64], time: &[f64], scale: f64) -> Result<FluxSeries> {
    if qs.len() != time.len() {
        return Err(VizError::shape(
            "qs",
            format!("{} flux samples for {} time samples", qs.len(), time.len()),
        ));
    }

    let volumetric_flux: Vec<f64> = qs.iter().map(|q| q * scale).collect();
    let cumulative_volume = cumulative_sum(&volumetric_flux);

    Ok(FluxSeries {
        time: time.to_vec(),
        volumetric_flux,
        cumulative_volume,
    })
}

pub fn cumulative_sum(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |total, v| {
            *total += v;
            Some(*total)
        })
        .collect()
}
