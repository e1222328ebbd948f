//! Province map geometry.
//!
//! Reads the GeoJSON province map into named [`ProvinceShape`]s. Only what
//! the joiner and the renderer need is kept: the `name` property, polygon
//! rings, bounds and a label anchor (centroid).

mod error;
mod geojson;
mod shape;

pub use error::{GeoError, Result};
pub use geojson::load_province_map;
pub use shape::{Bounds, Point, Polygon, ProvinceMap, ProvinceShape};
