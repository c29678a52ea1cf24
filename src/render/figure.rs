//! In-memory figure handle.
//!
//! A [`Figure`] describes what to draw: line traces, an optional
//! colour-mapped scatter with its colorbar, dashed vertical markers for fixed
//! structures, axis labels, title and legend. Nothing is rasterised until the
//! caller asks for it through [`Figure::draw`], [`Figure::render_rgb`] or
//! [`Figure::save`], so plot operations stay free of file output.

use crate::config::FigureSize;
use crate::error::{Result, VizError};
use crate::render::colormap::ColorScale;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

const COLORBAR_WIDTH: u32 = 140;
const DASH_SEGMENTS: usize = 40;
const LINE_WIDTH: u32 = 2;

#[derive(Debug, Clone)]
pub struct LineTrace {
    pub label: Option<String>,
    pub points: Vec<(f64, f64)>,
    pub color: RGBColor,
}

impl LineTrace {
    pub fn new(x: &[f64], y: &[f64], color: RGBColor) -> Self {
        LineTrace {
            label: None,
            points: x.iter().copied().zip(y.iter().copied()).collect(),
            color,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.1).collect()
    }
}

// Points coloured by a value through a colour scale
#[derive(Debug, Clone)]
pub struct ScatterTrace {
    pub points: Vec<(f64, f64)>,
    pub values: Vec<f64>,
    pub scale: ColorScale,
    pub radius: u32,
}

impl ScatterTrace {
    pub fn new(x: &[f64], y: &[f64], values: &[f64], scale: ColorScale) -> Self {
        ScatterTrace {
            points: x.iter().copied().zip(y.iter().copied()).collect(),
            values: values.to_vec(),
            scale,
            radius: 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Colorbar {
    pub label: String,
    pub scale: ColorScale,
}

// Dashed vertical line at a cross-shore position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalMarker {
    pub x: f64,
    pub color: RGBColor,
}

#[derive(Debug, Clone)]
pub struct Figure {
    pub size: FigureSize,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub lines: Vec<LineTrace>,
    pub scatter: Option<ScatterTrace>,
    pub colorbar: Option<Colorbar>,
    pub markers: Vec<VerticalMarker>,
    pub legend: bool,
    pub grid: bool,
}

impl Figure {
    pub fn new(size: FigureSize) -> Self {
        Figure {
            size,
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            lines: Vec::new(),
            scatter: None,
            colorbar: None,
            markers: Vec::new(),
            legend: false,
            grid: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    pub fn with_line(mut self, line: LineTrace) -> Self {
        self.lines.push(line);
        self
    }

    pub fn with_scatter(mut self, scatter: ScatterTrace, colorbar_label: impl Into<String>) -> Self {
        self.colorbar = Some(Colorbar {
            label: colorbar_label.into(),
            scale: scatter.scale,
        });
        self.scatter = Some(scatter);
        self
    }

    pub fn with_marker(mut self, x: f64, color: RGBColor) -> Self {
        self.markers.push(VerticalMarker { x, color });
        self
    }

    pub fn with_legend(mut self) -> Self {
        self.legend = true;
        self
    }

    pub fn with_grid(mut self) -> Self {
        self.grid = true;
        self
    }

    pub fn line(&self, label: &str) -> Option<&LineTrace> {
        self.lines
            .iter()
            .find(|l| l.label.as_deref() == Some(label))
    }

    fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        let scatter = self.scatter.iter().flat_map(|s| s.points.iter().copied());
        self.lines
            .iter()
            .flat_map(|l| l.points.iter().copied())
            .chain(scatter)
            .filter(|(x, y)| x.is_finite() && y.is_finite())
    }

    /// Axis ranges covering every trace and marker, padded by 5%.
    pub fn ranges(&self) -> (Range<f64>, Range<f64>) {
        let xs = self
            .points()
            .map(|p| p.0)
            .chain(self.markers.iter().map(|m| m.x));
        let ys = self.points().map(|p| p.1);
        (padded_range(xs), padded_range(ys))
    }

    /// Draw onto any plotters drawing area.
    pub fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        root.fill(&WHITE).map_err(VizError::render)?;

        match &self.colorbar {
            Some(colorbar) => {
                let width = root.dim_in_pixel().0;
                let (main, bar) = root.split_horizontally(width.saturating_sub(COLORBAR_WIDTH));
                self.draw_chart(&main)?;
                draw_colorbar(&bar, colorbar)
            }
            None => self.draw_chart(root),
        }
    }

    fn draw_chart<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<()> {
        let (x_range, y_range) = self.ranges();

        let mut chart = ChartBuilder::on(area)
            .caption(&self.title, ("sans-serif", 28).into_font())
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, y_range.clone())
            .map_err(VizError::render)?;

        let mut mesh = chart.configure_mesh();
        mesh.x_desc(&self.x_label).y_desc(&self.y_label);
        if !self.grid {
            mesh.disable_mesh();
        }
        mesh.draw().map_err(VizError::render)?;

        for marker in &self.markers {
            let style = marker.color.stroke_width(LINE_WIDTH);
            let step = (y_range.end - y_range.start) / DASH_SEGMENTS as f64;
            let x = marker.x;
            chart
                .draw_series((0..DASH_SEGMENTS).step_by(2).map(|k| {
                    let y0 = y_range.start + k as f64 * step;
                    PathElement::new(vec![(x, y0), (x, y0 + step)], style)
                }))
                .map_err(VizError::render)?;
        }

        for line in &self.lines {
            let color = line.color;
            let series = chart
                .draw_series(LineSeries::new(
                    line.points
                        .iter()
                        .copied()
                        .filter(|(x, y)| x.is_finite() && y.is_finite()),
                    color.stroke_width(LINE_WIDTH),
                ))
                .map_err(VizError::render)?;
            if let Some(label) = &line.label {
                series.label(label.as_str()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
                });
            }
        }

        if let Some(scatter) = &self.scatter {
            chart
                .draw_series(
                    scatter
                        .points
                        .iter()
                        .zip(&scatter.values)
                        .filter(|((x, y), _)| x.is_finite() && y.is_finite())
                        .map(|(&point, &value)| {
                            Circle::new(point, scatter.radius, scatter.scale.color(value).filled())
                        }),
                )
                .map_err(VizError::render)?;
        }

        if self.legend && self.lines.iter().any(|l| l.label.is_some()) {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(VizError::render)?;
        }

        Ok(())
    }

    /// Rasterise into a packed RGB buffer of `size.pixels()`.
    pub fn render_rgb(&self) -> Result<Vec<u8>> {
        let (width, height) = self.size.pixels();
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            self.draw(&root)?;
            root.present().map_err(VizError::render)?;
        }
        Ok(buffer)
    }

    /// Export as SVG when the extension is `svg`, otherwise as a bitmap (PNG).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let size = self.size.pixels();
        let is_svg = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

        if is_svg {
            let root = SVGBackend::new(path, size).into_drawing_area();
            self.draw(&root)?;
            root.present().map_err(VizError::render)?;
        } else {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            self.draw(&root)?;
            root.present().map_err(VizError::render)?;
        }

        log::info!("Saved figure {:?} to {:?}", self.title, path);
        Ok(())
    }
}

fn draw_colorbar<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, colorbar: &Colorbar) -> Result<()> {
    let scale = colorbar.scale;
    let (vmin, vmax) = if scale.vmin < scale.vmax {
        (scale.vmin, scale.vmax)
    } else {
        (scale.vmin - 0.5, scale.vmin + 0.5)
    };

    let mut chart = ChartBuilder::on(area)
        .margin_top(60)
        .margin_bottom(60)
        .margin_left(10)
        .right_y_label_area_size(70)
        .build_cartesian_2d(0.0..1.0, vmin..vmax)
        .map_err(VizError::render)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc(&colorbar.label)
        .y_label_formatter(&|v| format!("{:.2}", v))
        .draw()
        .map_err(VizError::render)?;

    let steps = 100;
    chart
        .draw_series((0..steps).map(|i| {
            let v0 = vmin + (vmax - vmin) * i as f64 / steps as f64;
            let v1 = vmin + (vmax - vmin) * (i + 1) as f64 / steps as f64;
            Rectangle::new([(0.0, v0), (1.0, v1)], scale.color(0.5 * (v0 + v1)).filled())
        }))
        .map_err(VizError::render)?;

    Ok(())
}

fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if lo > hi {
        return 0.0..1.0;
    }
    if lo == hi {
        return (lo - 0.5)..(hi + 0.5);
    }
    let pad = 0.05 * (hi - lo);
    (lo - pad)..(hi + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::colormap::Colormap;

    #[test]
    fn ranges_cover_lines_markers_and_scatter() {
        let figure = Figure::new(FigureSize::default())
            .with_line(LineTrace::new(&[0.0, 100.0], &[1.0, 3.0], BLACK))
            .with_marker(120.0, GREEN)
            .with_scatter(
                ScatterTrace::new(
                    &[10.0],
                    &[-1.0],
                    &[0.2],
                    ColorScale::new(Colormap::coolwarm_r(), 0.0, 0.4),
                ),
                "Moisture",
            );

        let (x, y) = figure.ranges();
        assert!(x.start < 0.0 && x.end > 120.0);
        assert!(y.start < -1.0 && y.end > 3.0);
        assert!(figure.colorbar.is_some());
    }

    #[test]
    fn ranges_ignore_non_finite_points() {
        let figure = Figure::new(FigureSize::default()).with_line(LineTrace::new(
            &[0.0, 1.0, 2.0],
            &[0.0, f64::NAN, 2.0],
            BLACK,
        ));
        let (_, y) = figure.ranges();
        assert!(y.start.is_finite() && y.end.is_finite());
        assert!(y.start < 0.0 && y.end > 2.0);
    }

    #[test]
    fn degenerate_ranges_are_widened() {
        assert_eq!(padded_range(std::iter::empty()), 0.0..1.0);
        assert_eq!(padded_range([2.0, 2.0].into_iter()), 1.5..2.5);
    }

    #[test]
    fn lines_are_found_by_label() {
        let figure = Figure::new(FigureSize::default())
            .with_line(LineTrace::new(&[0.0], &[1.0], BLACK).with_label("Initial"))
            .with_line(LineTrace::new(&[0.0], &[2.0], RED).with_label("Final"))
            .with_legend();
        assert_eq!(figure.line("Final").unwrap().ys(), vec![2.0]);
        assert!(figure.line("Difference").is_none());
    }

    fn full_figure() -> Figure {
        Figure::new(FigureSize::default())
            .with_title("Average moisture content")
            .with_labels("Cross-shore distance [m]", "Elevation rel MSL [m]")
            .with_line(LineTrace::new(&[0.0, 50.0, 100.0], &[-1.0, 0.5, 2.0], BLACK).with_label("Initial"))
            .with_line(LineTrace::new(&[0.0, 50.0, 100.0], &[-1.0, 0.8, 2.5], RED).with_label("Final"))
            .with_scatter(
                ScatterTrace::new(
                    &[0.0, 50.0, 100.0],
                    &[-1.0, 0.5, 2.0],
                    &[0.0, 0.2, 0.4],
                    ColorScale::new(Colormap::coolwarm_r(), 0.0, 0.4),
                ),
                "Moisture content [m³/m³]",
            )
            .with_marker(60.0, GREEN)
            .with_legend()
            .with_grid()
    }

    #[test]
    fn render_rgb_fills_frame_buffer() {
        let figure = full_figure();
        let (width, height) = figure.size.pixels();
        let rgb = figure.render_rgb().unwrap();
        assert_eq!(rgb.len(), width as usize * height as usize * 3);
        assert!(rgb.iter().any(|&b| b != 255));
    }

    #[test]
    fn save_png_and_svg() {
        let dir = tempfile::tempdir().unwrap();
        let figure = full_figure();

        let png = dir.path().join("moisture.png");
        figure.save(&png).unwrap();
        assert!(std::fs::metadata(&png).unwrap().len() > 0);

        let svg = dir.path().join("moisture.svg");
        figure.save(&svg).unwrap();
        let text = std::fs::read_to_string(&svg).unwrap();
        assert!(text.contains("<svg"));
    }
}
