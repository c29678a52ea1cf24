//! AeoLiS-shaped NetCDF fixtures for integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Layout and contents of a synthetic result file.
pub struct Fixture {
    pub n_times: usize,
    pub n_cells: usize,
    /// Spacing of the stored time values, in `time_units`
    pub dt: f64,
    pub time_units: Option<String>,
    /// Added to every bed level, to tell runs apart
    pub zb_offset: f64,
    /// Variables left out of the file
    pub omit: Vec<&'static str>,
}

impl Fixture {
    pub fn new(n_times: usize, n_cells: usize) -> Self {
        Fixture {
            n_times,
            n_cells,
            dt: 3600.0,
            time_units: Some("seconds since 2000-01-01 00:00:00".to_string()),
            zb_offset: 0.0,
            omit: Vec::new(),
        }
    }

    pub fn x(c: usize) -> f64 {
        c as f64 * 2.0
    }

    pub fn zb(&self, t: usize, c: usize) -> f64 {
        self.zb_offset + 0.01 * c as f64 + 0.001 * t as f64
    }

    pub fn qs(t: usize, c: usize) -> f64 {
        1.0e-3 * (t + 1) as f64 * (c + 1) as f64
    }

    pub fn moist(t: usize, c: usize) -> f64 {
        ((t + c) % 5) as f64 * 0.1
    }

    pub fn gw(t: usize, _c: usize) -> f64 {
        -0.5 + 0.01 * t as f64
    }

    fn field(&self, f: impl Fn(usize, usize) -> f64) -> Vec<f64> {
        (0..self.n_times)
            .flat_map(|t| (0..self.n_cells).map(move |c| (t, c)))
            .map(|(t, c)| f(t, c))
            .collect()
    }

    /// Write the file as (time, ny = 1, nx) fields plus x(ny, nx) and time(time).
    pub fn write(&self, path: &Path) -> netcdf::Result<()> {
        let mut file = netcdf::create(path)?;
        file.add_dimension("time", self.n_times)?;
        file.add_dimension("ny", 1)?;
        file.add_dimension("nx", self.n_cells)?;

        if !self.omit.contains(&"time") {
            let times: Vec<f64> = (0..self.n_times).map(|t| t as f64 * self.dt).collect();
            let mut var = file.add_variable::<f64>("time", &["time"])?;
            if let Some(units) = &self.time_units {
                var.put_attribute("units", units.as_str())?;
            }
            var.put_values(&times, ..)?;
        }

        if !self.omit.contains(&"x") {
            let x: Vec<f64> = (0..self.n_cells).map(Self::x).collect();
            let mut var = file.add_variable::<f64>("x", &["ny", "nx"])?;
            var.put_values(&x, ..)?;
        }

        let fields: [(&str, Vec<f64>); 4] = [
            ("zb", self.field(|t, c| self.zb(t, c))),
            ("qs", self.field(Self::qs)),
            ("moist", self.field(Self::moist)),
            ("gw", self.field(Self::gw)),
        ];
        for (name, values) in fields {
            if self.omit.contains(&name) {
                continue;
            }
            let mut var = file.add_variable::<f64>(name, &["time", "ny", "nx"])?;
            var.put_values(&values, ..)?;
        }

        Ok(())
    }

    /// Write into `dir` under `name` and return the path.
    pub fn write_in(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        self.write(&path).expect("failed to write fixture");
        path
    }
}
