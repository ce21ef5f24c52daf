//! Static geometry and point files.
//!
//! A dataset directory holds `geometries.json` and, optionally, `points.json`.
//! Both are read once. Structural problems the core cannot cope with (short
//! rings, non-finite coordinates, duplicate ids) are rejected here so the rest
//! of the engine can assume well-formed input.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use foundation::geo::LatLng;
use scene::{Geometry, Point, Store};

pub const GEOMETRIES_FILE_NAME: &str = "geometries.json";
pub const POINTS_FILE_NAME: &str = "points.json";

/// Minimum number of vertices in a geometry ring.
pub const MIN_RING_LEN: usize = 3;

#[derive(Debug)]
pub enum DatasetError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidGeometry {
        id: i64,
        reason: String,
    },
    InvalidPoint {
        id: i64,
        reason: String,
    },
    DuplicateId {
        kind: &'static str,
        id: i64,
    },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            DatasetError::Parse { path, source } => {
                write!(f, "failed to parse {}: {source}", path.display())
            }
            DatasetError::InvalidGeometry { id, reason } => {
                write!(f, "invalid geometry {id}: {reason}")
            }
            DatasetError::InvalidPoint { id, reason } => write!(f, "invalid point {id}: {reason}"),
            DatasetError::DuplicateId { kind, id } => write!(f, "duplicate {kind} id {id}"),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io { source, .. } => Some(source),
            DatasetError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub geometries: Vec<Geometry>,
    pub points: Vec<Point>,
}

impl Dataset {
    /// Load `geometries.json` and `points.json` from `root`.
    ///
    /// A missing points file means no points; a missing geometries file is an error.
    pub fn load_dir(root: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let root = root.as_ref();
        let geometries = read_json::<Vec<Geometry>>(&root.join(GEOMETRIES_FILE_NAME))?;

        let points_path = root.join(POINTS_FILE_NAME);
        let points = if points_path.exists() {
            read_json::<Vec<Point>>(&points_path)?
        } else {
            Vec::new()
        };

        Self::new(geometries, points)
    }

    /// Validate already-parsed records.
    pub fn new(geometries: Vec<Geometry>, points: Vec<Point>) -> Result<Self, DatasetError> {
        validate_geometries(&geometries)?;
        validate_points(&points)?;
        Ok(Self { geometries, points })
    }

    pub fn into_store(self) -> Store {
        Store::new(self.geometries, self.points)
    }
}

pub fn load_store_from_dir(root: impl AsRef<Path>) -> Result<Store, DatasetError> {
    Dataset::load_dir(root).map(Dataset::into_store)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DatasetError> {
    let payload = fs::read_to_string(path).map_err(|e| DatasetError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&payload).map_err(|e| DatasetError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

fn validate_geometries(geometries: &[Geometry]) -> Result<(), DatasetError> {
    let mut seen = HashSet::new();
    for g in geometries {
        if !seen.insert(g.id) {
            return Err(DatasetError::DuplicateId {
                kind: "geometry",
                id: g.id.0,
            });
        }
        if g.coordinates.len() < MIN_RING_LEN {
            return Err(DatasetError::InvalidGeometry {
                id: g.id.0,
                reason: format!(
                    "ring has {} points, need at least {MIN_RING_LEN}",
                    g.coordinates.len()
                ),
            });
        }
        if let Some(p) = g.coordinates.iter().find(|p| !valid_coordinate(p)) {
            return Err(DatasetError::InvalidGeometry {
                id: g.id.0,
                reason: format!("coordinate out of range: [{}, {}]", p.lat, p.lng),
            });
        }
    }
    Ok(())
}

fn validate_points(points: &[Point]) -> Result<(), DatasetError> {
    let mut seen = HashSet::new();
    for p in points {
        if !seen.insert(p.id) {
            return Err(DatasetError::DuplicateId {
                kind: "point",
                id: p.id.0,
            });
        }
        if !valid_coordinate(&p.coordinates) {
            return Err(DatasetError::InvalidPoint {
                id: p.id.0,
                reason: format!(
                    "coordinate out of range: [{}, {}]",
                    p.coordinates.lat, p.coordinates.lng
                ),
            });
        }
    }
    Ok(())
}

fn valid_coordinate(p: &LatLng) -> bool {
    p.is_finite() && (-90.0..=90.0).contains(&p.lat)
}
