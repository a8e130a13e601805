use serde::{Deserialize, Serialize};
use tracing::warn;

/// Latitude/longitude pair in degrees.
///
/// Serialized with the short `lat`/`lon` keys used by the POI catalog.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    #[serde(rename = "lat", alias = "latitude")]
    pub latitude: f64,
    #[serde(rename = "lon", alias = "longitude")]
    pub longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Validate and bring a raw coordinate into its nominal domain.
    ///
    /// Non-finite components are rejected. Latitude outside [-90, 90] is
    /// clamped and longitude outside [-180, 180] is wrapped; both emit a
    /// `warn` event but still produce a usable coordinate.
    pub fn checked(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        let latitude = finite("latitude", latitude)?;
        let longitude = finite("longitude", longitude)?;

        let clamped = clamp_latitude(latitude);
        if clamped != latitude {
            warn!("invalid latitude: {latitude}, clamping to [-90, 90]");
        }
        let wrapped = wrap_longitude(longitude);
        if wrapped != longitude {
            warn!("invalid longitude: {longitude}, normalizing to [-180, 180]");
        }

        Ok(Self::new(clamped, wrapped))
    }

    /// Same as [`GeoCoordinate::checked`], applied to an existing value.
    pub fn sanitized(self) -> Result<Self, CoordinateError> {
        Self::checked(self.latitude, self.longitude)
    }
}

/// Clamp latitude to [-90, 90].
pub fn clamp_latitude(latitude: f64) -> f64 {
    latitude.clamp(-90.0, 90.0)
}

/// Wrap longitude into [-180, 180]. In-range values are returned untouched,
/// so both 180 and -180 survive as given.
pub fn wrap_longitude(longitude: f64) -> f64 {
    if (-180.0..=180.0).contains(&longitude) {
        longitude
    } else {
        (longitude + 180.0).rem_euclid(360.0) - 180.0
    }
}

/// Precondition violations. Out-of-range latitude/longitude is not an error
/// (see [`GeoCoordinate::checked`]); everything here means the caller handed
/// in a value no coordinate can be derived from.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CoordinateError {
    NonFinite { field: &'static str, value: f64 },
    InvalidRadius(f64),
    ZeroVector,
    InvalidDimensions { width: f64, height: f64 },
}

impl std::fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordinateError::NonFinite { field, value } => {
                write!(f, "invalid input: {field} must be finite, got {value}")
            }
            CoordinateError::InvalidRadius(r) => {
                write!(f, "invalid input: sphere radius must be positive and finite, got {r}")
            }
            CoordinateError::ZeroVector => {
                write!(f, "invalid input: zero-length vector has no geographic position")
            }
            CoordinateError::InvalidDimensions { width, height } => {
                write!(f, "invalid input: image dimensions must be positive, got {width}x{height}")
            }
        }
    }
}

impl std::error::Error for CoordinateError {}

pub(crate) fn finite(field: &'static str, value: f64) -> Result<f64, CoordinateError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CoordinateError::NonFinite { field, value })
    }
}
