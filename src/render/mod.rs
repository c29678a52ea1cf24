pub mod colormap;
pub mod encoder;
pub mod figure;

pub use colormap::{ColorScale, Colormap};
pub use encoder::{FfmpegEncoder, FrameSink};
pub use figure::{Figure, LineTrace, ScatterTrace, VerticalMarker};
