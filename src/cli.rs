use aeolis_viz::config::DEFAULT_FLUX_CELL;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Plot AeoLiS result files
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); falls back to RUST_LOG
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initial and final profile, or bed level change
    Topo(TopoArgs),
    /// Volumetric or cumulative flux of one run
    Flux(FluxArgs),
    /// Flux of two runs at the same grid cell
    CompareFlux(CompareFluxArgs),
    /// Profile of two runs at one time step
    CompareTopo(CompareTopoArgs),
    /// Initial profile coloured by time-averaged moisture
    Moisture(StaticArgs),
    /// Groundwater and moisture animation encoded with ffmpeg
    Animate(AnimateArgs),
}

#[derive(Args, Debug)]
pub struct StaticArgs {
    /// AeoLiS result file
    pub ncfile: PathBuf,

    /// Figure file (.png or .svg)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Figure width and height in inches
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"], default_values_t = [10.0, 5.0])]
    pub figsize: Vec<f64>,

    #[arg(long, default_value_t = 100)]
    pub dpi: u32,
}

#[derive(Args, Debug)]
pub struct TopoArgs {
    #[command(flatten)]
    pub common: StaticArgs,

    /// Plot bed level change instead of the profiles
    #[arg(long)]
    pub change: bool,

    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub time_index_start: isize,

    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub time_index_end: isize,

    /// Mark a sand fence at this cross-shore position [m]
    #[arg(long, conflicts_with = "vegetation")]
    pub sand_fence: Option<f64>,

    /// Mark vegetation between two cross-shore positions [m]
    #[arg(long, num_args = 2, value_names = ["START", "END"])]
    pub vegetation: Option<Vec<f64>>,
}

#[derive(Args, Debug)]
pub struct FluxSelection {
    /// Plot instantaneous volumetric flux instead of the cumulative volume
    #[arg(long)]
    pub instantaneous: bool,

    #[arg(long, default_value_t = DEFAULT_FLUX_CELL, allow_negative_numbers = true)]
    pub grid_cell: isize,

    /// Sediment density [kg/m3]
    #[arg(long, default_value_t = 2650.0)]
    pub density: f64,

    /// Bed porosity [-]
    #[arg(long, default_value_t = 0.4)]
    pub porosity: f64,

    /// Also write the flux series to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct FluxArgs {
    #[command(flatten)]
    pub common: StaticArgs,

    #[command(flatten)]
    pub flux: FluxSelection,
}

#[derive(Args, Debug)]
pub struct RunPair {
    /// Result file of the second run
    pub second: PathBuf,

    /// Legend names of the two runs
    #[arg(long, num_args = 2, value_names = ["FIRST", "SECOND"])]
    pub labels: Option<Vec<String>>,
}

#[derive(Args, Debug)]
pub struct CompareFluxArgs {
    #[command(flatten)]
    pub common: StaticArgs,

    #[command(flatten)]
    pub runs: RunPair,

    #[command(flatten)]
    pub flux: FluxSelection,
}

#[derive(Args, Debug)]
pub struct CompareTopoArgs {
    #[command(flatten)]
    pub common: StaticArgs,

    #[command(flatten)]
    pub runs: RunPair,

    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub time_step: isize,
}

#[derive(Args, Debug)]
pub struct AnimateArgs {
    /// AeoLiS result file
    pub ncfile: PathBuf,

    /// Video extension; the video is written next to the result file
    #[arg(long, default_value = "mp4")]
    pub ext: String,

    /// Maximum number of frames
    #[arg(long, default_value_t = 168, conflicts_with = "all_frames")]
    pub nframes: usize,

    /// Render every time sample
    #[arg(long)]
    pub all_frames: bool,

    #[arg(long, default_value_t = 10)]
    pub fps: u32,

    /// Encoder executable
    #[arg(long, default_value = "ffmpeg")]
    pub encoder: String,
}

pub fn get_args() -> Cli {
    Cli::parse()
}
