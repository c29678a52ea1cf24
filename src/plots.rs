//! Static plots of AeoLiS results.
//!
//! Each operation reads what it needs through a caller-owned [`ResultFile`],
//! derives the plotted series and returns a [`Figure`] without exporting it.
//! The `*_figure` functions take already derived series and do no I/O.

use crate::config::{DEFAULT_FLUX_CELL, FigureSize, SedimentProperties};
use crate::error::{Result, VizError};
use crate::flux::{FluxSeries, integrate_flux, scale_flux, volume_scale};
use crate::io::{FluxSample, ResultFile};
use crate::profile::{ProfilePair, profile_at, profile_pair, time_average};
use crate::render::{ColorScale, Colormap, Figure, LineTrace, ScatterTrace};
use plotters::style::{BLACK, RED, RGBColor};

pub const DISTANCE_LABEL: &str = "Cross-shore distance [m]";
pub const ELEVATION_LABEL: &str = "Elevation rel MSL [m]";
pub const MOISTURE_AVE_LABEL: &str = "Average moisture content [m³/m³]";

/// Dashed markers for sand fence and vegetation.
pub const STRUCTURE_COLOR: RGBColor = RGBColor(0, 128, 0);

#[derive(Debug, Clone)]
pub struct TopoOptions {
    /// Plot bed level change instead of the two profiles
    pub change: bool,
    pub size: FigureSize,
    pub time_index_start: isize,
    pub time_index_end: isize,
}

impl Default for TopoOptions {
    fn default() -> Self {
        TopoOptions {
            change: false,
            size: FigureSize::default(),
            time_index_start: 0,
            time_index_end: -1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FluxOptions {
    /// Plot cumulative volume instead of volumetric flux
    pub cumulative: bool,
    pub size: FigureSize,
    pub grid_cell: isize,
    pub sediment: SedimentProperties,
}

impl Default for FluxOptions {
    fn default() -> Self {
        FluxOptions {
            cumulative: true,
            size: FigureSize::default(),
            grid_cell: DEFAULT_FLUX_CELL,
            sediment: SedimentProperties::default(),
        }
    }
}

// Legend names of the two runs being compared
#[derive(Debug, Clone, PartialEq)]
pub struct RunLabels {
    pub first: String,
    pub second: String,
}

impl RunLabels {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        RunLabels {
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn fence_and_vegetation() -> Self {
        Self::new("sand fence", "vegetation")
    }

    pub fn moisture_processes() -> Self {
        Self::new("no moisture", "with moisture")
    }
}

impl Default for RunLabels {
    fn default() -> Self {
        Self::fence_and_vegetation()
    }
}

/// Initial and final profile, or their difference, with optional structure markers.
pub fn topo_figure(pair: &ProfilePair, opts: &TopoOptions, markers: &[f64]) -> Figure {
    let figure = Figure::new(opts.size);
    let mut figure = if !opts.change {
        figure
            .with_title("Initial and final profiles")
            .with_labels(DISTANCE_LABEL, ELEVATION_LABEL)
            .with_line(LineTrace::new(&pair.x, &pair.initial, BLACK).with_label("Initial"))
            .with_line(LineTrace::new(&pair.x, &pair.last, RED).with_label("Final"))
            .with_legend()
    } else {
        figure
            .with_title("Elevation difference initial - final profile")
            .with_labels(DISTANCE_LABEL, "Elevation difference [m]")
            .with_line(LineTrace::new(&pair.x, &pair.difference(), BLACK).with_label("Difference"))
    };

    for &x in markers {
        figure = figure.with_marker(x, STRUCTURE_COLOR);
    }
    figure
}

pub fn plot_topo(file: &ResultFile, opts: &TopoOptions) -> Result<Figure> {
    plot_topo_with_markers(file, opts, &[])
}

/// Profiles with the sand fence position marked.
pub fn plot_topo_fence(file: &ResultFile, opts: &TopoOptions, sand_fence_x: f64) -> Result<Figure> {
    plot_topo_with_markers(file, opts, &[sand_fence_x])
}

/// Profiles with the vegetated stretch marked at both ends.
pub fn plot_topo_veg(
    file: &ResultFile,
    opts: &TopoOptions,
    veg_start: f64,
    veg_end: f64,
) -> Result<Figure> {
    plot_topo_with_markers(file, opts, &[veg_start, veg_end])
}

fn plot_topo_with_markers(file: &ResultFile, opts: &TopoOptions, markers: &[f64]) -> Result<Figure> {
    let history = file.read_profile()?;
    let pair = profile_pair(&history, opts.time_index_start, opts.time_index_end)?;
    Ok(topo_figure(&pair, opts, markers))
}

/// Volumetric flux at the configured cell of one run.
pub fn flux_series(file: &ResultFile, opts: &FluxOptions) -> Result<FluxSeries> {
    let sample = read_flux_sample(file, opts)?;
    integrate_flux(&sample.qs.to_vec(), &sample.time.seconds, &opts.sediment)
}

/// Flux of two runs at the same cell, both scaled with the first run's timestep.
///
/// The second run keeps its own time axis for plotting.
pub fn compare_flux_series(
    first: &ResultFile,
    second: &ResultFile,
    opts: &FluxOptions,
) -> Result<(FluxSeries, FluxSeries)> {
    let a = flux_series(first, opts)?;
    let scale = volume_scale(&a.time, &opts.sediment)?;
    let sample = read_flux_sample(second, opts)?;
    let b = scale_flux(&sample.qs.to_vec(), &sample.time.seconds, scale)?;
    Ok((a, b))
}

fn read_flux_sample(file: &ResultFile, opts: &FluxOptions) -> Result<FluxSample> {
    let sample = file.read_flux_sample(opts.grid_cell)?;
    log::debug!(
        "Read {} flux samples at cell {} of {:?}",
        sample.qs.len(),
        sample.cell,
        file.path()
    );
    Ok(sample)
}

/// Flux against time in days, one black/red line per named run.
pub fn flux_figure(runs: &[(Option<&str>, &FluxSeries)], opts: &FluxOptions) -> Figure {
    let (title, y_label) = if opts.cumulative {
        ("Cumulative volumetric flux", "Cumulative volumetric flux [m³/m]")
    } else {
        ("Volumetric flux", "Volumetric flux [m³/m/s]")
    };

    let mut figure = Figure::new(opts.size)
        .with_title(title)
        .with_labels("Time [days]", y_label)
        .with_legend();

    for (i, (name, series)) in runs.iter().enumerate() {
        let color = if i == 0 { BLACK } else { RED };
        let y = if opts.cumulative {
            &series.cumulative_volume
        } else {
            &series.volumetric_flux
        };
        let label = match name {
            Some(name) => format!("Volumetric flux - {}", name),
            None => title.to_string(),
        };
        figure = figure.with_line(LineTrace::new(&series.time_days(), y, color).with_label(label));
    }
    figure
}

pub fn plot_flux(file: &ResultFile, opts: &FluxOptions) -> Result<Figure> {
    let series = flux_series(file, opts)?;
    Ok(flux_figure(&[(None, &series)], opts))
}

/// Flux of two runs at the same grid cell.
pub fn compare_flux(
    first: &ResultFile,
    second: &ResultFile,
    labels: &RunLabels,
    opts: &FluxOptions,
) -> Result<Figure> {
    let (a, b) = compare_flux_series(first, second, opts)?;
    Ok(compare_flux_figure(&a, &b, labels, opts))
}

pub fn compare_flux_figure(
    first: &FluxSeries,
    second: &FluxSeries,
    labels: &RunLabels,
    opts: &FluxOptions,
) -> Figure {
    flux_figure(
        &[(Some(labels.first.as_str()), first), (Some(labels.second.as_str()), second)],
        opts,
    )
}

/// Profile of each run at `time_step` (`-1` is the last output).
pub fn compare_topo(
    first: &ResultFile,
    second: &ResultFile,
    labels: &RunLabels,
    size: FigureSize,
    time_step: isize,
) -> Result<Figure> {
    let mut figure = Figure::new(size)
        .with_title("Final profile")
        .with_labels(DISTANCE_LABEL, ELEVATION_LABEL)
        .with_legend();

    for (file, name, color) in [(first, &labels.first, BLACK), (second, &labels.second, RED)] {
        let history = file.read_profile()?;
        let zb = profile_at(&history, time_step)?;
        figure = figure.with_line(
            LineTrace::new(&history.x.to_vec(), &zb, color)
                .with_label(format!("Final profile - {}", name)),
        );
    }
    Ok(figure)
}

/// Initial profile coloured by the time-averaged moisture content.
pub fn plot_moisture_ave(file: &ResultFile, size: FigureSize) -> Result<Figure> {
    let history = file.read_profile()?;
    let moist = file.read_moisture()?;
    if moist.ncols() != history.x.len() {
        return Err(VizError::shape(
            &file.names().moist,
            format!("{} cells but x has {}", moist.ncols(), history.x.len()),
        ));
    }

    let moist_ave = time_average(&moist)?;
    let x = history.x.to_vec();
    let zb = profile_at(&history, 0)?;
    let scale = ColorScale::autoscaled(Colormap::coolwarm_r(), &moist_ave);

    Ok(Figure::new(size)
        .with_title("Average moisture content")
        .with_labels(DISTANCE_LABEL, ELEVATION_LABEL)
        .with_line(LineTrace::new(&x, &zb, BLACK))
        .with_scatter(ScatterTrace::new(&x, &zb, &moist_ave, scale), MOISTURE_AVE_LABEL)
        .with_grid())
}
