use std::path::Path;

// Configuration structure for result file variable names
#[derive(Debug, Clone)]
pub struct VariableNames {
    pub x: String,
    pub zb: String,
    pub qs: String,
    pub moist: String,
    pub gw: String,
    pub time: String,
}

impl VariableNames {
    pub fn new() -> Self {
        VariableNames {
            x: "x".to_string(),
            zb: "zb".to_string(),
            qs: "qs".to_string(),
            moist: "moist".to_string(),
            gw: "gw".to_string(),
            time: "time".to_string(),
        }
    }
}

impl Default for VariableNames {
    fn default() -> Self {
        Self::new()
    }
}

// Physical constants used to turn areal flux into bulk volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SedimentProperties {
    /// Sediment density [kg/m3]
    pub density: f64,
    /// Porosity [-]
    pub porosity: f64,
}

impl Default for SedimentProperties {
    fn default() -> Self {
        SedimentProperties {
            density: 2650.0,
            porosity: 0.4,
        }
    }
}

// Figure dimensions in inches, rasterised at `dpi`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureSize {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

impl FigureSize {
    pub fn new(width_in: f64, height_in: f64) -> Self {
        FigureSize {
            width_in,
            height_in,
            ..Self::default()
        }
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn pixels(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi as f64).round() as u32,
            (self.height_in * self.dpi as f64).round() as u32,
        )
    }
}

impl Default for FigureSize {
    fn default() -> Self {
        FigureSize {
            width_in: 10.0,
            height_in: 5.0,
            dpi: 100,
        }
    }
}

// Cross-shore positions [m] of fixed structures drawn as dashed markers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructureMarkers {
    pub sand_fence: f64,
    pub vegetation_start: f64,
    pub vegetation_end: f64,
}

impl Default for StructureMarkers {
    fn default() -> Self {
        StructureMarkers {
            sand_fence: 412.0,
            vegetation_start: 402.0,
            vegetation_end: 422.0,
        }
    }
}

/// Grid cell sampled for flux plots (where the dike starts).
pub const DEFAULT_FLUX_CELL: isize = 442;

// Moisture animation settings
#[derive(Debug, Clone)]
pub struct AnimationConfig {
    /// Video container extension, also selects the ffmpeg muxer
    pub extension: String,
    /// Requested frame count; `None` renders every time sample
    pub nframes: Option<usize>,
    pub fps: u32,
    pub size: FigureSize,
    /// Fixed colour range of the moisture scatter [m3/m3]
    pub moisture_range: (f64, f64),
    pub encoder: String,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            extension: "mp4".to_string(),
            nframes: Some(168),
            fps: 10,
            size: FigureSize::default().with_dpi(150),
            moisture_range: (0.0, 0.4),
            encoder: "ffmpeg".to_string(),
        }
    }
}

impl AnimationConfig {
    /// Video written next to the result file: same base name, configured extension.
    pub fn video_path(&self, ncfile: &Path) -> std::path::PathBuf {
        ncfile.with_extension(&self.extension)
    }
}
