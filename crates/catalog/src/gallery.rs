use serde::Serialize;

use crate::PoiRecord;

/// Deep-zoom image entry for the gallery views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DziImage {
    pub id: String,
    pub filename: String,
    pub title: String,
    pub body: String,
    pub description: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl From<&PoiRecord> for DziImage {
    fn from(poi: &PoiRecord) -> Self {
        let filename = match &poi.path {
            Some(path) => format!("{path}.dzi"),
            None => format!("poi_{}.dzi", poi.id),
        };
        let title = if poi.title.is_empty() {
            "Untitled POI".to_string()
        } else {
            poi.title.clone()
        };

        Self {
            id: poi.id.clone(),
            filename,
            title,
            body: poi.body().unwrap_or_else(|| "Unknown".to_string()),
            description: poi.description.clone(),
            lat: poi.latitude,
            lon: poi.longitude,
            path: poi.path.clone(),
        }
    }
}

pub fn gallery(pois: &[PoiRecord]) -> Vec<DziImage> {
    pois.iter().map(DziImage::from).collect()
}

/// Keep images of one body, ignoring case. An empty body keeps everything.
pub fn filter_by_body(images: Vec<DziImage>, body: &str) -> Vec<DziImage> {
    if body.is_empty() {
        return images;
    }
    let wanted = body.to_lowercase();
    images
        .into_iter()
        .filter(|img| img.body.to_lowercase() == wanted)
        .collect()
}
