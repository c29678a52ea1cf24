//! Post-processing plots for AeoLiS coastal morphodynamics results.
//!
//! Open a result file with [`ResultFile`], then build figures with the
//! functions in [`plots`] or encode the moisture animation with
//! [`animation::moisture_animation`]. Figures are returned as in-memory
//! [`Figure`] handles; exporting them is up to the caller.

pub mod animation;
pub mod config;
pub mod error;
pub mod flux;
pub mod io;
pub mod plots;
pub mod profile;
pub mod render;

pub use config::{AnimationConfig, FigureSize, SedimentProperties, StructureMarkers, VariableNames};
pub use error::{Result, VizError};
pub use flux::{FluxSeries, integrate_flux};
pub use io::ResultFile;
pub use render::Figure;
