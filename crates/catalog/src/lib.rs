//! Point-of-interest catalog.
//!
//! Records mirror what the POI service hands out: a coordinate plus
//! descriptive text and the `path` of the image or body it belongs to
//! (`"mars/12_34"`). Stores are synchronous and deterministic; listing order
//! is by id.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use foundation::math::{CoordinateError, GeoCoordinate};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod gallery;
pub mod placement;

pub use gallery::*;
pub use placement::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiRecord {
    pub id: String,
    #[serde(rename = "lat", alias = "latitude")]
    pub latitude: f64,
    #[serde(rename = "lon", alias = "longitude")]
    pub longitude: f64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Origin path, `"<body>/<tile>"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub origin: String,
}

impl PoiRecord {
    pub fn coordinate(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.latitude, self.longitude)
    }

    pub fn body(&self) -> Option<String> {
        self.path.as_deref().and_then(body_from_path)
    }
}

/// Create payload. `id` is generated when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPoi {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "lat", alias = "latitude")]
    pub latitude: f64,
    #[serde(rename = "lon", alias = "longitude")]
    pub longitude: f64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub origin: String,
}

impl NewPoi {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            ..Self::default()
        }
    }

    /// Coordinates must be finite. Out-of-range values are kept as given and
    /// normalized when the POI is placed.
    fn into_record(self) -> Result<PoiRecord, PoiError> {
        for (field, value) in [("latitude", self.latitude), ("longitude", self.longitude)] {
            if !value.is_finite() {
                return Err(PoiError::InvalidCoordinate(CoordinateError::NonFinite {
                    field,
                    value,
                }));
            }
        }

        let id = match self.id {
            Some(id) if !id.is_empty() => id,
            _ => uuid::Uuid::new_v4().to_string(),
        };

        Ok(PoiRecord {
            id,
            latitude: self.latitude,
            longitude: self.longitude,
            title: self.title,
            description: self.description,
            path: self.path,
            origin: self.origin,
        })
    }
}

/// Body key of an origin path: `"Mars/12_34"` -> `"mars"`.
pub fn body_from_path(path: &str) -> Option<String> {
    let mut parts = path.split('/');
    let head = parts.next()?;
    parts.next()?;
    if head.is_empty() {
        return None;
    }
    Some(head.to_lowercase())
}

#[derive(Debug, Clone, PartialEq)]
pub enum PoiError {
    Duplicate(String),
    InvalidCoordinate(CoordinateError),
    Corrupt(String),
    Io(String),
}

impl std::fmt::Display for PoiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoiError::Duplicate(id) => write!(f, "poi already exists: {id}"),
            PoiError::InvalidCoordinate(err) => write!(f, "poi coordinate rejected: {err}"),
            PoiError::Corrupt(msg) => write!(f, "poi catalog corrupt: {msg}"),
            PoiError::Io(msg) => write!(f, "poi catalog storage error: {msg}"),
        }
    }
}

impl std::error::Error for PoiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PoiError::InvalidCoordinate(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CoordinateError> for PoiError {
    fn from(err: CoordinateError) -> Self {
        PoiError::InvalidCoordinate(err)
    }
}

pub trait PoiStore {
    fn list(&self) -> Result<Vec<PoiRecord>, PoiError>;
    fn get(&self, id: &str) -> Result<Option<PoiRecord>, PoiError>;
    fn create(&mut self, poi: NewPoi) -> Result<PoiRecord, PoiError>;

    /// Records whose `path` equals `path`, ignoring case.
    fn list_by_path(&self, path: &str) -> Result<Vec<PoiRecord>, PoiError> {
        let wanted = path.to_lowercase();
        Ok(self
            .list()?
            .into_iter()
            .filter(|poi| poi.path.as_deref().is_some_and(|p| p.to_lowercase() == wanted))
            .collect())
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PoiSnapshot {
    pub entries: BTreeMap<String, PoiRecord>,
}

#[derive(Debug, Default)]
pub struct InMemoryPoiStore {
    snapshot: PoiSnapshot,
}

impl InMemoryPoiStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON array of records, the shape the POI service lists.
    pub fn from_json_str(json: &str) -> Result<Self, PoiError> {
        let records: Vec<PoiRecord> =
            serde_json::from_str(json).map_err(|e| PoiError::Corrupt(e.to_string()))?;

        let mut store = Self::new();
        for record in records {
            if store.snapshot.entries.contains_key(&record.id) {
                return Err(PoiError::Corrupt(format!("duplicate id: {}", record.id)));
            }
            store.snapshot.entries.insert(record.id.clone(), record);
        }
        Ok(store)
    }

    pub fn to_json_string(&self) -> Result<String, PoiError> {
        let records: Vec<&PoiRecord> = self.snapshot.entries.values().collect();
        serde_json::to_string_pretty(&records).map_err(|e| PoiError::Corrupt(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.snapshot.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.entries.is_empty()
    }
}

impl PoiStore for InMemoryPoiStore {
    fn list(&self) -> Result<Vec<PoiRecord>, PoiError> {
        Ok(self.snapshot.entries.values().cloned().collect())
    }

    fn get(&self, id: &str) -> Result<Option<PoiRecord>, PoiError> {
        Ok(self.snapshot.entries.get(id).cloned())
    }

    fn create(&mut self, poi: NewPoi) -> Result<PoiRecord, PoiError> {
        let record = poi.into_record()?;
        if self.snapshot.entries.contains_key(&record.id) {
            return Err(PoiError::Duplicate(record.id));
        }
        self.snapshot
            .entries
            .insert(record.id.clone(), record.clone());
        Ok(record)
    }
}

/// JSON-file backed store. A missing file is an empty catalog; every create
/// rewrites the whole file.
#[derive(Debug)]
pub struct FilePoiStore {
    path: PathBuf,
    inner: InMemoryPoiStore,
}

impl FilePoiStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PoiError> {
        let path = path.into();
        let inner = match fs::read_to_string(&path) {
            Ok(json) => InMemoryPoiStore::from_json_str(&json)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("poi catalog {path:?} not found, starting empty");
                InMemoryPoiStore::new()
            }
            Err(err) => return Err(PoiError::Io(format!("read {path:?}: {err}"))),
        };
        debug!("loaded {} pois from {path:?}", inner.len());
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), PoiError> {
        let json = self.inner.to_json_string()?;
        fs::write(&self.path, json)
            .map_err(|e| PoiError::Io(format!("write {:?}: {e}", self.path)))?;
        debug!("wrote {} pois to {:?}", self.inner.len(), self.path);
        Ok(())
    }
}

impl PoiStore for FilePoiStore {
    fn list(&self) -> Result<Vec<PoiRecord>, PoiError> {
        self.inner.list()
    }

    fn get(&self, id: &str) -> Result<Option<PoiRecord>, PoiError> {
        self.inner.get(id)
    }

    fn create(&mut self, poi: NewPoi) -> Result<PoiRecord, PoiError> {
        let record = self.inner.create(poi)?;
        // Memory must never hold a record the file does not.
        if let Err(err) = self.persist() {
            self.inner.snapshot.entries.remove(&record.id);
            return Err(err);
        }
        Ok(record)
    }
}
