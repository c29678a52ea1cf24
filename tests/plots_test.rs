mod common;

use aeolis_viz::VizError;
use aeolis_viz::animation::{MoistureAnimation, moisture_animation};
use aeolis_viz::config::{AnimationConfig, FigureSize, SedimentProperties, StructureMarkers};
use aeolis_viz::flux::integrate_flux;
use aeolis_viz::io::ResultFile;
use aeolis_viz::plots::{self, FluxOptions, RunLabels, STRUCTURE_COLOR, TopoOptions};
use approx::assert_relative_eq;
use common::Fixture;
use tempfile::tempdir;

#[test]
fn test_plot_topo_profiles_and_change() {
    let dir = tempdir().unwrap();
    let fixture = Fixture::new(4, 6);
    let file = ResultFile::open(fixture.write_in(dir.path(), "run.nc")).unwrap();

    let figure = plots::plot_topo(&file, &TopoOptions::default()).unwrap();
    assert_eq!(figure.title, "Initial and final profiles");
    let initial = figure.line("Initial").unwrap();
    let last = figure.line("Final").unwrap();
    assert_eq!(initial.points[5], (Fixture::x(5), fixture.zb(0, 5)));
    assert_eq!(last.points[5], (Fixture::x(5), fixture.zb(3, 5)));

    let change = TopoOptions {
        change: true,
        time_index_start: 1,
        time_index_end: 2,
        ..TopoOptions::default()
    };
    let figure = plots::plot_topo(&file, &change).unwrap();
    let diff = figure.line("Difference").unwrap();
    for (c, y) in diff.ys().iter().enumerate() {
        assert_relative_eq!(*y, fixture.zb(1, c) - fixture.zb(2, c), epsilon = 1e-12);
    }
}

#[test]
fn test_structure_markers() {
    let dir = tempdir().unwrap();
    let file = ResultFile::open(Fixture::new(3, 4).write_in(dir.path(), "run.nc")).unwrap();
    let markers = StructureMarkers::default();

    let fence =
        plots::plot_topo_fence(&file, &TopoOptions::default(), markers.sand_fence).unwrap();
    assert_eq!(fence.markers.len(), 1);
    assert_eq!(fence.markers[0].x, 412.0);
    assert_eq!(fence.markers[0].color, STRUCTURE_COLOR);

    let change = TopoOptions {
        change: true,
        ..TopoOptions::default()
    };
    let veg = plots::plot_topo_veg(
        &file,
        &change,
        markers.vegetation_start,
        markers.vegetation_end,
    )
    .unwrap();
    let xs: Vec<f64> = veg.markers.iter().map(|m| m.x).collect();
    assert_eq!(xs, vec![402.0, 422.0]);
    assert!(veg.line("Difference").is_some());
}

#[test]
fn test_topo_time_index_out_of_range() {
    let dir = tempdir().unwrap();
    let file = ResultFile::open(Fixture::new(3, 4).write_in(dir.path(), "run.nc")).unwrap();
    let opts = TopoOptions {
        time_index_end: 3,
        ..TopoOptions::default()
    };
    assert!(matches!(
        plots::plot_topo(&file, &opts),
        Err(VizError::IndexOutOfRange { index: 3, len: 3 })
    ));
}

#[test]
fn test_plot_flux_matches_integrator() {
    let dir = tempdir().unwrap();
    let file = ResultFile::open(Fixture::new(24, 6).write_in(dir.path(), "run.nc")).unwrap();
    let opts = FluxOptions {
        grid_cell: 4,
        ..FluxOptions::default()
    };

    let qs: Vec<f64> = (0..24).map(|t| Fixture::qs(t, 4)).collect();
    let time: Vec<f64> = (0..24).map(|t| t as f64 * 3600.0).collect();
    let expected = integrate_flux(&qs, &time, &SedimentProperties::default()).unwrap();

    let figure = plots::plot_flux(&file, &opts).unwrap();
    let line = figure.line("Cumulative volumetric flux").unwrap();
    for (got, want) in line.ys().iter().zip(&expected.cumulative_volume) {
        assert_relative_eq!(*got, *want, max_relative = 1e-12);
    }
    assert_relative_eq!(line.points[23].0, 23.0 / 24.0, epsilon = 1e-12);

    let ys = line.ys();
    assert!(ys.windows(2).all(|w| w[1] >= w[0]));
}

#[test]
fn test_default_flux_cell_beyond_small_grid() {
    let dir = tempdir().unwrap();
    let file = ResultFile::open(Fixture::new(3, 10).write_in(dir.path(), "run.nc")).unwrap();
    assert!(matches!(
        plots::plot_flux(&file, &FluxOptions::default()),
        Err(VizError::IndexOutOfRange { index: 442, len: 10 })
    ));
}

#[test]
fn test_single_time_sample_flux_fails() {
    let dir = tempdir().unwrap();
    let file = ResultFile::open(Fixture::new(1, 5).write_in(dir.path(), "short.nc")).unwrap();
    let opts = FluxOptions {
        grid_cell: 0,
        ..FluxOptions::default()
    };
    assert!(matches!(
        plots::plot_flux(&file, &opts),
        Err(VizError::InsufficientSamples {
            required: 2,
            found: 1
        })
    ));
}

#[test]
fn test_compare_flux_two_runs() {
    let dir = tempdir().unwrap();
    let fence = Fixture::new(5, 4).write_in(dir.path(), "fence.nc");
    let mut veg_fixture = Fixture::new(5, 4);
    veg_fixture.dt = 1800.0;
    let veg = veg_fixture.write_in(dir.path(), "veg.nc");

    let first = ResultFile::open(&fence).unwrap();
    let second = ResultFile::open(&veg).unwrap();
    let opts = FluxOptions {
        cumulative: false,
        grid_cell: 1,
        ..FluxOptions::default()
    };
    let figure =
        plots::compare_flux(&first, &second, &RunLabels::fence_and_vegetation(), &opts).unwrap();

    assert_eq!(figure.title, "Volumetric flux");
    let a = figure.line("Volumetric flux - sand fence").unwrap();
    let b = figure.line("Volumetric flux - vegetation").unwrap();
    // The second run is scaled with the first run's hourly step
    for (t, (ya, yb)) in a.ys().iter().zip(b.ys().iter()).enumerate() {
        assert_relative_eq!(*ya, *yb, max_relative = 1e-12);
        assert_relative_eq!(*yb, Fixture::qs(t, 1) * 3600.0 / (2650.0 * 0.6), max_relative = 1e-12);
    }
    assert_relative_eq!(a.points[4].0, 4.0 * 3600.0 / 86400.0, epsilon = 1e-12);
    assert_relative_eq!(b.points[4].0, 4.0 * 1800.0 / 86400.0, epsilon = 1e-12);

    let (_, veg_series) = plots::compare_flux_series(&second, &first, &opts).unwrap();
    assert_relative_eq!(
        veg_series.volumetric_flux[0],
        Fixture::qs(0, 1) * 1800.0 / (2650.0 * 0.6),
        max_relative = 1e-12
    );
}

#[test]
fn test_compare_topo_uses_each_run() {
    let dir = tempdir().unwrap();
    let fence_fixture = Fixture::new(3, 4);
    let mut veg_fixture = Fixture::new(3, 4);
    veg_fixture.zb_offset = 1.0;
    let first = ResultFile::open(fence_fixture.write_in(dir.path(), "fence.nc")).unwrap();
    let second = ResultFile::open(veg_fixture.write_in(dir.path(), "veg.nc")).unwrap();

    let figure = plots::compare_topo(
        &first,
        &second,
        &RunLabels::default(),
        FigureSize::default(),
        -1,
    )
    .unwrap();

    assert_eq!(figure.title, "Final profile");
    let fence = figure.line("Final profile - sand fence").unwrap();
    let veg = figure.line("Final profile - vegetation").unwrap();
    for c in 0..4 {
        assert_relative_eq!(fence.points[c].1, fence_fixture.zb(2, c));
        assert_relative_eq!(veg.points[c].1, veg_fixture.zb(2, c));
    }
}

#[test]
fn test_moisture_average_plot() {
    let dir = tempdir().unwrap();
    let fixture = Fixture::new(5, 6);
    let file = ResultFile::open(fixture.write_in(dir.path(), "run.nc")).unwrap();

    let figure = plots::plot_moisture_ave(&file, FigureSize::default()).unwrap();
    assert_eq!(figure.title, "Average moisture content");
    assert!(figure.grid);

    let scatter = figure.scatter.as_ref().unwrap();
    for c in 0..6 {
        let mean = (0..5).map(|t| Fixture::moist(t, c)).sum::<f64>() / 5.0;
        assert_relative_eq!(scatter.values[c], mean, epsilon = 1e-12);
        assert_relative_eq!(scatter.points[c].1, fixture.zb(0, c));
    }
    let colorbar = figure.colorbar.as_ref().unwrap();
    assert_eq!(colorbar.label, plots::MOISTURE_AVE_LABEL);
    assert!(colorbar.scale.vmin <= colorbar.scale.vmax);
}

#[test]
fn test_animation_frames_are_clamped() {
    let dir = tempdir().unwrap();
    let file = ResultFile::open(Fixture::new(12, 5).write_in(dir.path(), "run.nc")).unwrap();

    let config = AnimationConfig {
        nframes: Some(1000),
        ..AnimationConfig::default()
    };
    let animation = MoistureAnimation::load(&file, config).unwrap();
    assert_eq!(animation.frame_count(), 12);

    let frame = animation.frame(11).unwrap();
    assert_eq!(frame.title, "Time =11 h");
    assert_eq!(frame.lines.len(), 2);
}

#[test]
fn test_animation_without_encoder() {
    let dir = tempdir().unwrap();
    let file = ResultFile::open(Fixture::new(3, 4).write_in(dir.path(), "run.nc")).unwrap();
    let config = AnimationConfig {
        encoder: "aeolis-viz-missing-encoder".to_string(),
        ..AnimationConfig::default()
    };

    assert!(matches!(
        moisture_animation(&file, &config),
        Err(VizError::EncoderUnavailable { .. })
    ));
}
