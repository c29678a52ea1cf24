use crate::config::VariableNames;
use crate::error::{Result, VizError, resolve_index};
use crate::io::results::{FluxSample, MoistureHistory, ProfileHistory};
use crate::io::time::TimeAxis;
use ndarray::{Array1, Array2, ArrayD, Axis, Ix1, Ix2, IxDyn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// Read-only handle on an AeoLiS NetCDF result file.
//
// The file is closed when the handle is dropped. Every read goes to the
// file; nothing is cached between calls.
pub struct ResultFile {
    path: PathBuf,
    file: netcdf::File,
    names: VariableNames,
}

impl ResultFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_names(path, VariableNames::new())
    }

    pub fn open_with_names(path: impl AsRef<Path>, names: VariableNames) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = netcdf::open(&path).map_err(|source| VizError::InvalidFile {
            path: path.clone(),
            source,
        })?;
        log::debug!("Opened result file {:?}", path);

        Ok(ResultFile { path, file, names })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn names(&self) -> &VariableNames {
        &self.names
    }

    fn variable(&self, name: &str) -> Result<netcdf::Variable<'_>> {
        self.file
            .variable(name)
            .ok_or_else(|| VizError::MissingVariable(name.to_string()))
    }

    /// Read a variable with its stored shape.
    pub fn read_field(&self, name: &str) -> Result<ArrayD<f64>> {
        let var = self.variable(name)?;
        let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
        let values: Vec<f64> = var.get_values(..)?;
        log::debug!("Read {} with shape {:?}", name, shape);

        ArrayD::from_shape_vec(IxDyn(&shape), values)
            .map_err(|e| VizError::shape(name, e.to_string()))
    }

    /// Read several variables, dropping their singleton dimensions.
    pub fn read_fields(&self, names: &[&str]) -> Result<HashMap<String, ArrayD<f64>>> {
        names
            .iter()
            .map(|name| Ok((name.to_string(), squeeze(self.read_field(name)?))))
            .collect()
    }

    pub fn read_time(&self) -> Result<TimeAxis> {
        let name = &self.names.time;
        let var = self.variable(name)?;
        let units = var
            .attribute_value("units")
            .and_then(|r| r.ok())
            .and_then(|v| match v {
                netcdf::AttributeValue::Str(s) => Some(s),
                _ => None,
            });
        let values = into_1d(squeeze_to(self.read_field(name)?, 1, name)?, name)?;

        Ok(TimeAxis::new(values.to_vec(), units.as_deref()))
    }

    pub fn read_x(&self) -> Result<Array1<f64>> {
        read_1d(self, &self.names.x)
    }

    pub fn read_profile(&self) -> Result<ProfileHistory> {
        let x = self.read_x()?;
        let zb = read_2d(self, &self.names.zb)?;
        check_cells(&self.names.zb, &zb, x.len())?;

        Ok(ProfileHistory { x, zb })
    }

    /// Flux time series at one grid cell (last axis), negative cells count from the end.
    pub fn read_flux_sample(&self, cell: isize) -> Result<FluxSample> {
        let name = &self.names.qs;
        let qs = self.read_field(name)?;
        let last = qs
            .ndim()
            .checked_sub(1)
            .ok_or_else(|| VizError::shape(name, "scalar flux variable"))?;
        let cell = resolve_index(cell, qs.len_of(Axis(last)))?;
        let qs = squeeze_to(qs.index_axis_move(Axis(last), cell), 1, name)?;
        let time = self.read_time()?;

        Ok(FluxSample {
            cell,
            qs: into_1d(qs, name)?,
            time,
        })
    }

    /// Surface moisture content, (time, space).
    pub fn read_moisture(&self) -> Result<Array2<f64>> {
        read_2d(self, &self.names.moist)
    }

    /// Groundwater level, (time, space).
    pub fn read_groundwater(&self) -> Result<Array2<f64>> {
        read_2d(self, &self.names.gw)
    }

    pub fn read_moisture_history(&self) -> Result<MoistureHistory> {
        let profile = self.read_profile()?;
        let moist = self.read_moisture()?;
        let gw = self.read_groundwater()?;
        let time = self.read_time()?;

        for (name, field) in [(&self.names.moist, &moist), (&self.names.gw, &gw)] {
            if field.dim() != profile.zb.dim() {
                return Err(VizError::shape(
                    name,
                    format!("{:?} does not match bed level {:?}", field.dim(), profile.zb.dim()),
                ));
            }
        }

        Ok(MoistureHistory {
            profile,
            moist,
            gw,
            time,
        })
    }
}

fn read_1d(file: &ResultFile, name: &str) -> Result<Array1<f64>> {
    into_1d(squeeze_to(file.read_field(name)?, 1, name)?, name)
}

fn read_2d(file: &ResultFile, name: &str) -> Result<Array2<f64>> {
    squeeze_to(file.read_field(name)?, 2, name)?
        .into_dimensionality::<Ix2>()
        .map_err(|e| VizError::shape(name, e.to_string()))
}

fn into_1d(array: ArrayD<f64>, name: &str) -> Result<Array1<f64>> {
    array
        .into_dimensionality::<Ix1>()
        .map_err(|e| VizError::shape(name, e.to_string()))
}

fn check_cells(name: &str, field: &Array2<f64>, n_cells: usize) -> Result<()> {
    if field.ncols() != n_cells {
        return Err(VizError::shape(
            name,
            format!("{} cells but x has {}", field.ncols(), n_cells),
        ));
    }
    Ok(())
}

/// Drop every axis of length one.
pub fn squeeze(mut array: ArrayD<f64>) -> ArrayD<f64> {
    for axis in (0..array.ndim()).rev() {
        if array.len_of(Axis(axis)) == 1 {
            array = array.index_axis_move(Axis(axis), 0);
        }
    }
    array
}

/// Drop singleton axes, innermost first, until `rank` axes remain.
///
/// Unlike `squeeze` this keeps a length-one time axis, so a single-sample
/// series is still a series.
pub fn squeeze_to(mut array: ArrayD<f64>, rank: usize, name: &str) -> Result<ArrayD<f64>> {
    let original = array.shape().to_vec();
    while array.ndim() > rank {
        let singleton = (0..array.ndim())
            .rev()
            .find(|&axis| array.len_of(Axis(axis)) == 1);
        match singleton {
            Some(axis) => array = array.index_axis_move(Axis(axis), 0),
            None => break,
        }
    }

    // A scalar stands for a single sample
    if array.ndim() == 0 && rank == 1 {
        array = array.insert_axis(Axis(0));
    }

    if array.ndim() != rank {
        return Err(VizError::shape(
            name,
            format!("expected {} dimensions after squeezing {:?}", rank, original),
        ));
    }
    Ok(array)
}
