use crate::error::{Result, VizError, resolve_index};
use crate::io::results::ProfileHistory;
use ndarray::{Array2, Axis};

// Bed level at two moments of a run
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePair {
    pub x: Vec<f64>,
    pub initial: Vec<f64>,
    pub last: Vec<f64>,
}

impl ProfilePair {
    /// Erosion (positive) and deposition (negative): initial minus final.
    pub fn difference(&self) -> Vec<f64> {
        self.initial
            .iter()
            .zip(&self.last)
            .map(|(a, b)| a - b)
            .collect()
    }
}

/// Row of a (time, space) field; negative indices count from the end.
pub fn row_at(field: &Array2<f64>, index: isize) -> Result<Vec<f64>> {
    let row = resolve_index(index, field.nrows())?;
    Ok(field.row(row).to_vec())
}

pub fn profile_at(history: &ProfileHistory, time_index: isize) -> Result<Vec<f64>> {
    row_at(&history.zb, time_index)
}

pub fn profile_pair(history: &ProfileHistory, start: isize, end: isize) -> Result<ProfilePair> {
    Ok(ProfilePair {
        x: history.x.to_vec(),
        initial: profile_at(history, start)?,
        last: profile_at(history, end)?,
    })
}

/// Mean over the time axis, one value per grid cell.
pub fn time_average(field: &Array2<f64>) -> Result<Vec<f64>> {
    field
        .mean_axis(Axis(0))
        .map(|mean| mean.to_vec())
        .ok_or(VizError::InsufficientSamples {
            required: 1,
            found: 0,
        })
}
