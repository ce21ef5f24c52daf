use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use foundation::bounds::GeoBounds;
use foundation::geo::{LatLng, Viewport};
use runtime::{EventBus, MapEvent, ViewToggle};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;
use viewer_native::{MapController, MemorySurface, ViewerConfig};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ColorBy {
    Date,
    Accuracy,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless map view: geometries, points and the reference grid")]
struct Args {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory with geometries.json and points.json (overrides config and ATLAS_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// View bounds: south,west,north,east (default: extent of the data)
    #[arg(long, allow_hyphen_values = true)]
    bounds: Option<String>,

    /// Zoom level of the view
    #[arg(long, default_value_t = 17)]
    zoom: i32,

    /// Lock the grid size at this zoom before moving to --zoom
    #[arg(long)]
    lock_at_zoom: Option<i32>,

    /// Show the reference grid
    #[arg(long)]
    grid: bool,

    /// Hide points
    #[arg(long)]
    no_points: bool,

    /// Geometry coloring
    #[arg(long, value_enum)]
    color_by: Option<ColorBy>,

    /// Pointer position for the coordinate readout: lat,lng
    #[arg(long, allow_hyphen_values = true)]
    cursor: Option<String>,

    /// Print overlays, cells and metrics as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };
    config.apply_env();
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    if args.grid {
        config.view.show_grid = true;
    }
    if args.no_points {
        config.view.show_points = false;
    }
    if let Some(color_by) = args.color_by {
        config.view.color_by_date = color_by == ColorBy::Date;
    }

    let store = formats::load_store_from_dir(&config.data_dir)?;
    info!(
        data_dir = %config.data_dir.display(),
        geometries = store.geometries().len(),
        points = store.points().len(),
        "dataset loaded"
    );

    let bounds = match &args.bounds {
        Some(text) => parse_bounds(text)?,
        None => store
            .extent()
            .ok_or("no --bounds given and the dataset is empty")?,
    };
    let cursor = args.cursor.as_deref().map(parse_lat_lng).transpose()?;

    // The grid lock captures the zoom shown at the moment of locking.
    let start_zoom = args.lock_at_zoom.unwrap_or(args.zoom);
    let surface = MemorySurface::new(Viewport::new(bounds, start_zoom));
    let mut controller = MapController::new(surface, store, config.grid_layer(), config.view);

    let mut bus = EventBus::new();
    if args.lock_at_zoom.is_some() {
        bus.emit(MapEvent::Toggle(ViewToggle::LockGrid, true));
    }
    controller.process(&mut bus);

    let target = Viewport::new(bounds, args.zoom);
    controller.surface_mut().set_viewport(target);
    bus.emit(MapEvent::ViewportSettled(target));
    controller.process(&mut bus);

    let readout = cursor.map(|position| controller.cursor(position));

    if args.json {
        let out = json!({
            "viewport": target,
            "locked_lat_step": controller.lock().frozen_step(),
            "overlays": controller.surface().overlays(),
            "cells": controller.cells(),
            "cursor": readout.map(|r| r.to_string()),
            "metrics": controller.metrics().snapshot(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for (name, primitives) in controller.surface().overlays() {
        println!("{name}: {} primitives", primitives.len());
    }
    if let Some(step) = controller.lock().frozen_step() {
        println!("grid locked at lat step {step}");
    }
    for cell in controller.cells() {
        println!(
            "cell {},{} {} {}",
            cell.index.x, cell.index.y, cell.fill, cell.label
        );
    }
    if let Some(readout) = readout {
        println!("{readout}");
    }
    Ok(())
}

fn parse_numbers<const N: usize>(text: &str, what: &str) -> Result<[f64; N], String> {
    let values = text
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid {what} {text:?}: {e}"))?;
    values
        .try_into()
        .map_err(|_| format!("{what} needs {N} comma-separated numbers, got {text:?}"))
}

fn parse_bounds(text: &str) -> Result<GeoBounds, String> {
    let [south, west, north, east] = parse_numbers::<4>(text, "bounds")?;
    if south > north || west > east {
        return Err(format!("bounds {text:?} must be south,west,north,east"));
    }
    Ok(GeoBounds::new(south, west, north, east))
}

fn parse_lat_lng(text: &str) -> Result<LatLng, String> {
    let [lat, lng] = parse_numbers::<2>(text, "position")?;
    Ok(LatLng::new(lat, lng))
}

#[cfg(test)]
mod tests {
    use super::{parse_bounds, parse_lat_lng};
    use foundation::bounds::GeoBounds;
    use foundation::geo::LatLng;

    #[test]
    fn bounds_accept_negative_values_and_spaces() {
        assert_eq!(
            parse_bounds("51.49, -0.13, 51.52,-0.08"),
            Ok(GeoBounds::new(51.49, -0.13, 51.52, -0.08))
        );
        assert_eq!(
            parse_bounds("-34.0,-58.5,-33.9,-58.3"),
            Ok(GeoBounds::new(-34.0, -58.5, -33.9, -58.3))
        );
    }

    #[test]
    fn bounds_need_four_numbers() {
        let err = parse_bounds("1,2,3").expect_err("three values");
        assert!(err.contains("needs 4"), "{err}");
        assert!(parse_bounds("1,2,3,4,5").is_err());
        assert!(parse_bounds("").is_err());
    }

    #[test]
    fn bounds_reject_non_numeric_input() {
        let err = parse_bounds("a,0,1,1").expect_err("not a number");
        assert!(err.starts_with("invalid bounds"), "{err}");
    }

    #[test]
    fn bounds_reject_inverted_edges() {
        assert!(parse_bounds("2,0,1,1").is_err());
        assert!(parse_bounds("0,2,1,1").is_err());
    }

    #[test]
    fn positions_parse_as_lat_lng() {
        assert_eq!(parse_lat_lng("51.5007,-0.1246"), Ok(LatLng::new(51.5007, -0.1246)));
        assert!(parse_lat_lng("51.5").is_err());
        assert!(parse_lat_lng("north,west").is_err());
    }
}
