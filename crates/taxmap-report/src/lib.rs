//! Choropleth rendering and artifact bundling.
//!
//! A joined map becomes three maps (accrual, collection, collection ratio)
//! drawn as SVG and rasterized to PNG, a CSV of the joined table and a zip
//! archive holding the PNGs and the CSV.
//! [`RenderCache`] keeps finished renders for the rest of a session.

pub mod bundle;
pub mod cache;
pub mod naming;
pub mod raster;
pub mod render;
pub mod scale;
pub mod svg;

pub use bundle::{build_archive, joined_csv};
pub use cache::{RenderCache, RenderKey};
pub use naming::{ArtifactNames, MapKind, sanitize_file_name};
pub use raster::Rasterizer;
pub use render::{ProvinceFigures, RenderedMaps, render_maps};
pub use svg::render_map_svg;
