//! `poi-atlas`: coordinate conversions and POI placement from the shell.
//!
//! Every command returns the text to print; JSON for anything structured.

use std::path::PathBuf;

use catalog::{
    FilePoiStore, NewPoi, PoiRecord, PoiStore, gallery, place_hotspots, place_on_image,
    place_on_sphere,
};
use clap::{Parser, Subcommand, ValueEnum};
use foundation::math::{
    DEFAULT_SPHERE_RADIUS, GeoCoordinate, Sphere, Vec3, to_image_plane,
};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(
    name = "poi-atlas",
    version,
    about = "Place planetary points of interest on globes and deep-zoom images"
)]
pub struct Cli {
    /// Sphere radius for globe conversions.
    #[arg(long, global = true, env = "POI_RADIUS", default_value_t = DEFAULT_SPHERE_RADIUS)]
    pub radius: f64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Latitude/longitude to a point on the sphere.
    Cartesian {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
    /// Point on (or near) the sphere back to latitude/longitude.
    Geographic {
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        #[arg(long, allow_negative_numbers = true)]
        z: f64,
    },
    /// Great-circle distance between two `LAT,LON` pairs.
    Distance {
        #[arg(long, value_parser = parse_lat_lon, allow_hyphen_values = true)]
        from: GeoCoordinate,
        #[arg(long, value_parser = parse_lat_lon, allow_hyphen_values = true)]
        to: GeoCoordinate,
    },
    /// Latitude/longitude to the normalized deep-zoom image plane.
    Plane {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
    /// Place every catalog POI (optionally one origin path) as markers.
    Place {
        #[arg(long, env = "POI_CATALOG", default_value = "pois.json")]
        catalog: PathBuf,
        #[arg(long)]
        path: Option<String>,
        #[arg(long, value_enum, default_value_t = Surface::Globe)]
        surface: Surface,
    },
    /// Add a POI to the catalog.
    Add {
        #[arg(long, env = "POI_CATALOG", default_value = "pois.json")]
        catalog: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        path: Option<String>,
    },
    /// Round-trip reference locations and report any drift.
    Verify {
        /// Allowed error in degrees.
        #[arg(long, default_value_t = 1e-6)]
        tolerance: f64,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Surface {
    /// Markers at each POI's own coordinate.
    Globe,
    /// Markers on the flattened deep-zoom image.
    Image,
    /// Gallery hotspots spread evenly over the globe.
    Hotspots,
}

/// Known sites across the bodies the viewer ships models for, plus the poles.
pub const REFERENCE_LOCATIONS: &[(&str, f64, f64)] = &[
    ("Olympus Mons", 18.65, -133.8),
    ("Valles Marineris", -14.0, -59.2),
    ("Mount Everest", 27.988, 86.925),
    ("Grand Canyon", 36.1069, -112.1129),
    ("Tranquility Base (Apollo 11)", 0.674, 23.473),
    ("Tycho Crater", -43.3, -11.2),
    ("Equator, prime meridian", 0.0, 0.0),
    ("Equator, 180E", 0.0, 180.0),
    ("North Pole", 90.0, 0.0),
    ("South Pole", -90.0, 0.0),
];

pub fn run(cli: Cli) -> Result<String, String> {
    let sphere = Sphere::new(cli.radius).map_err(|e| e.to_string())?;
    debug!("using sphere radius {}", sphere.radius());

    match cli.command {
        Command::Cartesian { lat, lon } => {
            let p = sphere
                .to_cartesian(GeoCoordinate::new(lat, lon))
                .map_err(|e| e.to_string())?;
            to_json(&p)
        }
        Command::Geographic { x, y, z } => {
            let geo = sphere
                .to_geographic(Vec3::new(x, y, z))
                .map_err(|e| e.to_string())?;
            to_json(&geo)
        }
        Command::Distance { from, to } => {
            let d = sphere.distance(from, to).map_err(|e| e.to_string())?;
            Ok(d.to_string())
        }
        Command::Plane { lat, lon } => {
            let p = to_image_plane(lat, lon).map_err(|e| e.to_string())?;
            to_json(&p)
        }
        Command::Place {
            catalog,
            path,
            surface,
        } => cmd_place(sphere, catalog, path, surface),
        Command::Add {
            catalog,
            lat,
            lon,
            title,
            description,
            path,
        } => {
            let mut store = FilePoiStore::open(&catalog).map_err(|e| e.to_string())?;
            let record = store
                .create(NewPoi {
                    title,
                    description,
                    path,
                    ..NewPoi::new(lat, lon)
                })
                .map_err(|e| e.to_string())?;
            info!("added poi {} to {}", record.id, catalog.display());
            to_json(&record)
        }
        Command::Verify { tolerance } => cmd_verify(sphere, tolerance),
    }
}

fn cmd_place(
    sphere: Sphere,
    catalog: PathBuf,
    path: Option<String>,
    surface: Surface,
) -> Result<String, String> {
    let store = FilePoiStore::open(&catalog).map_err(|e| e.to_string())?;
    let pois: Vec<PoiRecord> = match &path {
        Some(p) => store.list_by_path(p),
        None => store.list(),
    }
    .map_err(|e| e.to_string())?;

    match surface {
        Surface::Globe => to_json(&place_on_sphere(&pois, sphere)),
        Surface::Image => to_json(&place_on_image(&pois)),
        Surface::Hotspots => to_json(&place_hotspots(&gallery(&pois), sphere)),
    }
}

#[derive(Debug, Serialize)]
struct VerifyRow {
    name: &'static str,
    input: GeoCoordinate,
    position: Vec3,
    recovered: GeoCoordinate,
    ok: bool,
}

fn cmd_verify(sphere: Sphere, tolerance: f64) -> Result<String, String> {
    let mut rows = Vec::with_capacity(REFERENCE_LOCATIONS.len());

    for &(name, lat, lon) in REFERENCE_LOCATIONS {
        let input = GeoCoordinate::new(lat, lon);
        let position = sphere.to_cartesian(input).map_err(|e| e.to_string())?;
        let recovered = sphere.to_geographic(position).map_err(|e| e.to_string())?;

        let lat_ok = (recovered.latitude - lat).abs() <= tolerance;
        // Longitude is meaningless at the poles.
        let lon_ok = lat.abs() == 90.0 || longitude_error(recovered.longitude, lon) <= tolerance;

        rows.push(VerifyRow {
            name,
            input,
            position,
            recovered,
            ok: lat_ok && lon_ok,
        });
    }

    let report = to_json(&rows)?;
    let failed = rows.iter().filter(|r| !r.ok).count();
    if failed > 0 {
        return Err(format!(
            "{report}\n{failed} of {} reference locations drifted beyond {tolerance} degrees",
            rows.len()
        ));
    }
    Ok(report)
}

fn longitude_error(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

fn parse_lat_lon(s: &str) -> Result<GeoCoordinate, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got {s:?}"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("latitude {lat:?}: {e}"))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|e| format!("longitude {lon:?}: {e}"))?;
    Ok(GeoCoordinate::new(lat, lon))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("json: {e}"))
}
