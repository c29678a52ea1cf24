use crate::io::time::TimeAxis;
use ndarray::{Array1, Array2};

// Cross-shore coordinate and bed level history of one run
#[derive(Debug, Clone)]
pub struct ProfileHistory {
    /// Cross-shore distance [m], one per grid cell
    pub x: Array1<f64>,
    /// Bed level [m], (time, space)
    pub zb: Array2<f64>,
}

// Areal sediment flux at a single grid cell
#[derive(Debug, Clone)]
pub struct FluxSample {
    pub cell: usize,
    /// Areal flux [kg/m/s], one per time sample
    pub qs: Array1<f64>,
    pub time: TimeAxis,
}

// Fields needed for the moisture plots and animation
#[derive(Debug, Clone)]
pub struct MoistureHistory {
    pub profile: ProfileHistory,
    /// Surface moisture content [m3/m3], (time, space)
    pub moist: Array2<f64>,
    /// Groundwater level [m], (time, space)
    pub gw: Array2<f64>,
    pub time: TimeAxis,
}

impl MoistureHistory {
    pub fn n_times(&self) -> usize {
        self.profile.zb.nrows()
    }
}
