use aeolis_viz::animation::moisture_animation;
use aeolis_viz::config::{AnimationConfig, FigureSize, SedimentProperties};
use aeolis_viz::io::csv::write_flux_csv;
use aeolis_viz::plots::{self, FluxOptions, RunLabels, TopoOptions};
use aeolis_viz::{Figure, ResultFile};
use anyhow::{Context, Result};
use chrono::Local;
use log::LevelFilter;
use std::io::Write;
use std::path::Path;

mod cli;

use cli::{Command, FluxSelection, RunPair, StaticArgs, get_args};

fn main() -> Result<()> {
    let args = get_args();
    init_logging(args.log_level.as_deref());

    match args.command {
        Command::Topo(topo) => {
            let file = open(&topo.common.ncfile)?;
            print_period(&file);
            let opts = TopoOptions {
                change: topo.change,
                size: figure_size(&topo.common),
                time_index_start: topo.time_index_start,
                time_index_end: topo.time_index_end,
            };
            let figure = match (topo.sand_fence, topo.vegetation.as_deref()) {
                (Some(fence), _) => plots::plot_topo_fence(&file, &opts, fence),
                (None, Some([start, end])) => plots::plot_topo_veg(&file, &opts, *start, *end),
                _ => plots::plot_topo(&file, &opts),
            }
            .context("Failed to build topography plot")?;
            save(&figure, &topo.common.output)?;
        }
        Command::Flux(flux) => {
            let file = open(&flux.common.ncfile)?;
            print_period(&file);
            let opts = flux_options(&flux.common, &flux.flux);
            let series = plots::flux_series(&file, &opts)
                .with_context(|| format!("Failed to integrate flux of {:?}", flux.common.ncfile))?;
            if let Some(csv_path) = &flux.flux.csv {
                write_flux_csv(csv_path, &[("run", &series)])
                    .with_context(|| format!("Failed to write CSV: {:?}", csv_path))?;
                println!("Flux series saved to {}", csv_path.display());
            }
            let figure = plots::flux_figure(&[(None, &series)], &opts);
            save(&figure, &flux.common.output)?;
        }
        Command::CompareFlux(compare) => {
            let opts = flux_options(&compare.common, &compare.flux);
            let labels = run_labels(&compare.runs);

            let first_file = open(&compare.common.ncfile)?;
            let second_file = open(&compare.runs.second)?;
            let (first, second) = plots::compare_flux_series(&first_file, &second_file, &opts)
                .context("Failed to integrate flux of the two runs")?;

            if let Some(csv_path) = &compare.flux.csv {
                write_flux_csv(
                    csv_path,
                    &[(labels.first.as_str(), &first), (labels.second.as_str(), &second)],
                )
                .with_context(|| format!("Failed to write CSV: {:?}", csv_path))?;
                println!("Flux series saved to {}", csv_path.display());
            }
            let figure = plots::compare_flux_figure(&first, &second, &labels, &opts);
            save(&figure, &compare.common.output)?;
        }
        Command::CompareTopo(compare) => {
            let first = open(&compare.common.ncfile)?;
            let second = open(&compare.runs.second)?;
            let figure = plots::compare_topo(
                &first,
                &second,
                &run_labels(&compare.runs),
                figure_size(&compare.common),
                compare.time_step,
            )
            .context("Failed to build profile comparison")?;
            save(&figure, &compare.common.output)?;
        }
        Command::Moisture(common) => {
            let file = open(&common.ncfile)?;
            print_period(&file);
            let figure = plots::plot_moisture_ave(&file, figure_size(&common))
                .context("Failed to build moisture plot")?;
            save(&figure, &common.output)?;
        }
        Command::Animate(animate) => {
            let file = open(&animate.ncfile)?;
            print_period(&file);
            let config = AnimationConfig {
                extension: animate.ext,
                nframes: if animate.all_frames {
                    None
                } else {
                    Some(animate.nframes)
                },
                fps: animate.fps,
                encoder: animate.encoder,
                ..AnimationConfig::default()
            };

            println!("\nStarting moisture animation...");
            let videofile = moisture_animation(&file, &config)
                .with_context(|| format!("Failed to animate {:?}", animate.ncfile))?;
            println!("\nAnimation complete. Output saved to {}", videofile.display());
        }
    }

    Ok(())
}

fn init_logging(level: Option<&str>) {
    let log_level = level
        .and_then(|l| l.parse::<LevelFilter>().ok())
        .or_else(|| std::env::var("RUST_LOG").ok().and_then(|v| v.parse().ok()))
        .unwrap_or(LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(log_level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:5}] {}",
                Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
    log::debug!("Logger initialized (level: {})", log_level);
}

fn open(path: &Path) -> Result<ResultFile> {
    ResultFile::open(path).with_context(|| format!("Failed to open result file: {:?}", path))
}

fn print_period(file: &ResultFile) {
    if let Ok(time) = file.read_time() {
        if let Some((start, end)) = time.period() {
            println!("Result file: {}", file.path().display());
            println!("  Period: {} to {}", start, end);
            println!("  Output steps: {}", time.len());
        }
    }
}

fn figure_size(args: &StaticArgs) -> FigureSize {
    match args.figsize.as_slice() {
        [width, height] => FigureSize::new(*width, *height).with_dpi(args.dpi),
        _ => FigureSize::default().with_dpi(args.dpi),
    }
}

fn flux_options(common: &StaticArgs, flux: &FluxSelection) -> FluxOptions {
    FluxOptions {
        cumulative: !flux.instantaneous,
        size: figure_size(common),
        grid_cell: flux.grid_cell,
        sediment: SedimentProperties {
            density: flux.density,
            porosity: flux.porosity,
        },
    }
}

fn run_labels(runs: &RunPair) -> RunLabels {
    match runs.labels.as_deref() {
        Some([first, second]) => RunLabels::new(first.as_str(), second.as_str()),
        _ => RunLabels::default(),
    }
}

fn save(figure: &Figure, output: &Path) -> Result<()> {
    figure
        .save(output)
        .with_context(|| format!("Failed to save figure: {:?}", output))?;
    println!("Figure saved to {}", output.display());
    Ok(())
}
