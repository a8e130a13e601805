//! Turn catalog records into scene markers.
//!
//! A record that cannot be placed is skipped with a warning; the remaining
//! records are still returned.

use foundation::math::{Sphere, Vec2, Vec3, golden_spiral, to_image_plane};
use serde::Serialize;
use tracing::warn;

use crate::{DziImage, PoiRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobeMarker {
    pub id: String,
    pub title: String,
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageMarker {
    pub id: String,
    pub title: String,
    pub point: Vec2,
}

pub fn place_on_sphere(pois: &[PoiRecord], sphere: Sphere) -> Vec<GlobeMarker> {
    pois.iter()
        .filter_map(|poi| match sphere.to_cartesian(poi.coordinate()) {
            Ok(position) => Some(GlobeMarker {
                id: poi.id.clone(),
                title: poi.title.clone(),
                position,
            }),
            Err(err) => {
                warn!("skipping poi {}: {err}", poi.id);
                None
            }
        })
        .collect()
}

pub fn place_on_image(pois: &[PoiRecord]) -> Vec<ImageMarker> {
    pois.iter()
        .filter_map(|poi| match to_image_plane(poi.latitude, poi.longitude) {
            Ok(point) => Some(ImageMarker {
                id: poi.id.clone(),
                title: poi.title.clone(),
                point,
            }),
            Err(err) => {
                warn!("skipping poi {}: {err}", poi.id);
                None
            }
        })
        .collect()
}

/// Gallery hotspots spread over the sphere in gallery order.
pub fn place_hotspots(images: &[DziImage], sphere: Sphere) -> Vec<GlobeMarker> {
    images
        .iter()
        .zip(golden_spiral(images.len(), sphere.radius()))
        .map(|(img, position)| GlobeMarker {
            id: img.id.clone(),
            title: img.title.clone(),
            position,
        })
        .collect()
}
