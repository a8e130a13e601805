//! Linear mapping onto the flattened deep-zoom image.
//!
//! Longitude spans the full width. Latitude is compressed into the upper
//! half of the unit square (`y` in [0, 0.5]), north at the top. This is not
//! a projection of the sphere in [`super::sphere`] and the two must not be
//! mixed.

use super::coord::{CoordinateError, GeoCoordinate, finite};
use super::Vec2;

/// Fraction of the image height covered by latitude.
pub const LATITUDE_BAND: f64 = 0.5;

pub fn to_image_plane(latitude: f64, longitude: f64) -> Result<Vec2, CoordinateError> {
    let geo = GeoCoordinate::checked(latitude, longitude)?;
    Ok(Vec2::new(
        (geo.longitude + 180.0) / 360.0,
        ((90.0 - geo.latitude) / 180.0) * LATITUDE_BAND,
    ))
}

/// Inverse of [`to_image_plane`]. Points outside the band are clamped or
/// wrapped like any other out-of-range coordinate.
pub fn from_image_plane(point: Vec2) -> Result<GeoCoordinate, CoordinateError> {
    let x = finite("x", point.x)?;
    let y = finite("y", point.y)?;
    GeoCoordinate::checked(90.0 - (y / LATITUDE_BAND) * 180.0, x * 360.0 - 180.0)
}

/// Pixel dimensions of a deep-zoom image.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ImagePlane {
    width: f64,
    height: f64,
}

impl ImagePlane {
    pub fn new(width: f64, height: f64) -> Result<Self, CoordinateError> {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok(Self { width, height })
        } else {
            Err(CoordinateError::InvalidDimensions { width, height })
        }
    }

    pub fn to_pixels(self, point: Vec2) -> Vec2 {
        Vec2::new(point.x * self.width, point.y * self.height)
    }

    pub fn from_pixels(self, pixel: Vec2) -> Vec2 {
        Vec2::new(pixel.x / self.width, pixel.y / self.height)
    }

    pub fn geo_to_pixels(self, latitude: f64, longitude: f64) -> Result<Vec2, CoordinateError> {
        to_image_plane(latitude, longitude).map(|p| self.to_pixels(p))
    }
}
