use crate::config::AnimationConfig;
use crate::error::{Result, VizError, resolve_index};
use crate::io::{MoistureHistory, ResultFile};
use crate::plots::{DISTANCE_LABEL, ELEVATION_LABEL};
use crate::profile::row_at;
use crate::render::{ColorScale, Colormap, FfmpegEncoder, Figure, FrameSink, LineTrace, ScatterTrace};
use indicatif::{ProgressBar, ProgressStyle};
use plotters::style::{BLACK, BLUE};
use std::path::PathBuf;

pub const MOISTURE_LABEL: &str = "Moisture content [m³/m³]";

/// Number of frames to render: the request, limited to the available samples.
pub fn clamp_frame_count(requested: Option<usize>, available: usize) -> usize {
    requested.map_or(available, |n| n.min(available))
}

/// Frame title with whole hours since the start, e.g. `Time =3 h`.
pub fn frame_title(seconds: f64) -> String {
    format!("Time ={} h", (seconds / 3600.0).trunc() as i64)
}

// Groundwater level and surface moisture across the profile, frame by frame
pub struct MoistureAnimation {
    history: MoistureHistory,
    config: AnimationConfig,
}

impl MoistureAnimation {
    pub fn new(history: MoistureHistory, config: AnimationConfig) -> Result<Self> {
        if history.time.len() != history.n_times() {
            return Err(VizError::shape(
                "time",
                format!(
                    "{} time samples for {} bed level outputs",
                    history.time.len(),
                    history.n_times()
                ),
            ));
        }
        Ok(MoistureAnimation { history, config })
    }

    pub fn load(file: &ResultFile, config: AnimationConfig) -> Result<Self> {
        Self::new(file.read_moisture_history()?, config)
    }

    pub fn frame_count(&self) -> usize {
        clamp_frame_count(self.config.nframes, self.history.n_times())
    }

    /// Full scene at time index `index`.
    pub fn frame(&self, index: usize) -> Result<Figure> {
        let i = resolve_index(index as isize, self.history.n_times())? as isize;
        let x = self.history.profile.x.to_vec();
        let zb = row_at(&self.history.profile.zb, i)?;
        let gw = row_at(&self.history.gw, i)?;
        let moist = row_at(&self.history.moist, i)?;
        let (vmin, vmax) = self.config.moisture_range;
        let scale = ColorScale::new(Colormap::coolwarm_r(), vmin, vmax);

        Ok(Figure::new(self.config.size)
            .with_title(frame_title(self.history.time.seconds[i as usize]))
            .with_labels(DISTANCE_LABEL, ELEVATION_LABEL)
            .with_line(LineTrace::new(&x, &gw, BLUE))
            .with_line(LineTrace::new(&x, &zb, BLACK))
            .with_scatter(ScatterTrace::new(&x, &zb, &moist, scale), MOISTURE_LABEL))
    }

    /// Render frames 0..frame_count() into `sink`, then close it.
    pub fn render<S: FrameSink>(&self, mut sink: S) -> Result<PathBuf> {
        let nframes = self.frame_count();
        log::info!(
            "Rendering {} of {} available frames",
            nframes,
            self.history.n_times()
        );

        let pb = ProgressBar::new(nframes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} frames ({eta})")
                .map_err(VizError::render)?
                .progress_chars("#>-"),
        );

        for i in 0..nframes {
            let rgb = self.frame(i)?.render_rgb()?;
            sink.push_frame(&rgb)?;
            pb.inc(1);
        }
        pb.finish_and_clear();

        sink.finish()
    }
}

/// Encode the moisture animation next to the result file and return the video path.
pub fn moisture_animation(file: &ResultFile, config: &AnimationConfig) -> Result<PathBuf> {
    let animation = MoistureAnimation::load(file, config.clone())?;
    let videofile = config.video_path(file.path());
    let encoder = FfmpegEncoder::spawn(
        &config.encoder,
        &videofile,
        config.size.pixels(),
        config.fps,
    )?;

    let written = animation.render(encoder)?;
    log::info!("Saved animation to {:?}", written);
    Ok(written)
}
