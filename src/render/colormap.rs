use plotters::style::RGBColor;

// Diverging blue-white-red map sampled at five stops
const COOLWARM: [(f64, (u8, u8, u8)); 5] = [
    (0.0, (59, 76, 192)),
    (0.25, (141, 176, 254)),
    (0.5, (221, 221, 221)),
    (0.75, (244, 154, 123)),
    (1.0, (180, 4, 38)),
];

/// Colour used for NaN values.
const INVALID: RGBColor = RGBColor(128, 128, 128);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colormap {
    stops: &'static [(f64, (u8, u8, u8))],
    reversed: bool,
}

impl Colormap {
    pub fn coolwarm() -> Self {
        Colormap {
            stops: &COOLWARM,
            reversed: false,
        }
    }

    /// Wet is blue, dry is red.
    pub fn coolwarm_r() -> Self {
        Colormap {
            stops: &COOLWARM,
            reversed: true,
        }
    }

    /// Colour at normalised position `t`, clamped to [0, 1].
    pub fn color_at(&self, t: f64) -> RGBColor {
        if t.is_nan() {
            return INVALID;
        }
        let t = t.clamp(0.0, 1.0);
        let t = if self.reversed { 1.0 - t } else { t };

        for pair in self.stops.windows(2) {
            let (t0, c0) = pair[0];
            let (t1, c1) = pair[1];
            if t <= t1 {
                let w = (t - t0) / (t1 - t0);
                return RGBColor(lerp(c0.0, c1.0, w), lerp(c0.1, c1.1, w), lerp(c0.2, c1.2, w));
            }
        }
        let (_, last) = self.stops[self.stops.len() - 1];
        RGBColor(last.0, last.1, last.2)
    }
}

fn lerp(a: u8, b: u8, w: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * w).round() as u8
}

// Colormap bound to a value range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub colormap: Colormap,
    pub vmin: f64,
    pub vmax: f64,
}

impl ColorScale {
    pub fn new(colormap: Colormap, vmin: f64, vmax: f64) -> Self {
        ColorScale {
            colormap,
            vmin,
            vmax,
        }
    }

    /// Range spanning the finite values, as an unconstrained scatter would.
    pub fn autoscaled(colormap: Colormap, values: &[f64]) -> Self {
        let (vmin, vmax) = values
            .iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if vmin > vmax {
            return ColorScale::new(colormap, 0.0, 1.0);
        }
        ColorScale::new(colormap, vmin, vmax)
    }

    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.vmax - self.vmin;
        if span == 0.0 {
            return 0.5;
        }
        (value - self.vmin) / span
    }

    pub fn color(&self, value: f64) -> RGBColor {
        self.colormap.color_at(self.normalize(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_stops() {
        let cmap = Colormap::coolwarm();
        assert_eq!(cmap.color_at(0.0), RGBColor(59, 76, 192));
        assert_eq!(cmap.color_at(1.0), RGBColor(180, 4, 38));
        assert_eq!(cmap.color_at(0.5), RGBColor(221, 221, 221));
    }

    #[test]
    fn reversed_map_swaps_ends() {
        let cmap = Colormap::coolwarm_r();
        assert_eq!(cmap.color_at(0.0), RGBColor(180, 4, 38));
        assert_eq!(cmap.color_at(1.0), RGBColor(59, 76, 192));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let scale = ColorScale::new(Colormap::coolwarm_r(), 0.0, 0.4);
        assert_eq!(scale.color(-1.0), scale.color(0.0));
        assert_eq!(scale.color(0.9), scale.color(0.4));
        assert_eq!(scale.color(f64::NAN), INVALID);
    }

    #[test]
    fn autoscale_uses_finite_extremes() {
        let scale = ColorScale::autoscaled(Colormap::coolwarm_r(), &[0.1, f64::NAN, 0.3, 0.2]);
        assert_eq!((scale.vmin, scale.vmax), (0.1, 0.3));
        approx::assert_relative_eq!(scale.normalize(0.2), 0.5, epsilon = 1e-12);

        let flat = ColorScale::autoscaled(Colormap::coolwarm(), &[0.2, 0.2]);
        assert_eq!(flat.normalize(0.2), 0.5);
    }
}
