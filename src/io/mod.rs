pub mod csv;
pub mod netcdf;
pub mod results;
pub mod time;

pub use self::netcdf::ResultFile;
pub use results::{FluxSample, MoistureHistory, ProfileHistory};
pub use time::{TimeAxis, TimeUnits};
