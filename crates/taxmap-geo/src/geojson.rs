//! GeoJSON province map reader.

use std::path::Path;
use std::time::Instant;

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{GeoError, Result};
use crate::shape::{Point, Polygon, ProvinceMap, ProvinceShape};

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<serde_json::Map<String, Value>>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

type Ring = Vec<Vec<f64>>;

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon {
        coordinates: Vec<Ring>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Ring>>,
    },
    #[serde(other)]
    Other,
}

/// Reads the province map from a GeoJSON `FeatureCollection`.
///
/// Each feature's `name` property becomes the shape name. Features without
/// a text `name` are skipped with a warning; geometry types other than
/// `Polygon` and `MultiPolygon` yield a shape with no polygons.
pub fn load_province_map(path: &Path) -> Result<ProvinceMap> {
    let start = Instant::now();
    let text = std::fs::read_to_string(path).map_err(|source| GeoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let collection: FeatureCollection =
        serde_json::from_str(&text).map_err(|source| GeoError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let map = build_map(collection);
    if map.is_empty() {
        return Err(GeoError::NoFeatures {
            path: path.to_path_buf(),
        });
    }
    info!(
        path = %path.display(),
        shapes = map.len(),
        duration_ms = start.elapsed().as_millis(),
        "province map loaded"
    );
    Ok(map)
}

fn build_map(collection: FeatureCollection) -> ProvinceMap {
    let mut shapes = Vec::with_capacity(collection.features.len());
    for (index, feature) in collection.features.into_iter().enumerate() {
        let name = feature
            .properties
            .as_ref()
            .and_then(|properties| properties.get("name"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty());
        let Some(name) = name else {
            warn!(feature = index, "skipping map feature without a name");
            continue;
        };
        let polygons = match feature.geometry {
            Some(Geometry::Polygon { coordinates }) => vec![polygon_from_rings(coordinates)],
            Some(Geometry::MultiPolygon { coordinates }) => {
                coordinates.into_iter().map(polygon_from_rings).collect()
            }
            Some(Geometry::Other) | None => Vec::new(),
        };
        shapes.push(ProvinceShape::new(name, polygons));
    }
    ProvinceMap::new(shapes)
}

fn polygon_from_rings(rings: Vec<Ring>) -> Polygon {
    let mut rings = rings.into_iter().map(ring_points);
    let exterior = rings.next().unwrap_or_default();
    Polygon {
        exterior,
        holes: rings.collect(),
    }
}

/// Positions with fewer than two coordinates are dropped.
fn ring_points(ring: Ring) -> Vec<Point> {
    ring.into_iter()
        .filter_map(|position| match position.as_slice() {
            [x, y, ..] => Some(Point::new(*x, *y)),
            _ => None,
        })
        .collect()
}
