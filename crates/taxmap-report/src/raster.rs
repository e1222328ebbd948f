//! PNG rasterization of the SVG maps.

use std::fmt;
use std::io::Cursor;

use anyhow::{Context, Result, anyhow};
use image::{ImageBuffer, ImageFormat, RgbaImage};
use resvg::tiny_skia::{self, Pixmap};
use resvg::usvg::{Options, Tree};

/// Turns SVG documents into PNG images.
///
/// The system font database is loaded once, when the rasterizer is built.
pub struct Rasterizer {
    options: Options<'static>,
}

impl Rasterizer {
    pub fn new() -> Self {
        let mut options = Options::default();
        options.fontdb_mut().load_system_fonts();
        Self { options }
    }

    /// Renders `svg` at its own size onto a white background.
    pub fn render_png(&self, svg: &str) -> Result<Vec<u8>> {
        let tree = Tree::from_str(svg, &self.options).context("parse svg")?;
        let size = tree.size().to_int_size();
        let (width, height) = (size.width(), size.height());

        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| anyhow!("cannot allocate a {width}x{height} pixmap"))?;
        // Opaque pixels, so the premultiplied buffer is plain RGBA.
        pixmap.fill(tiny_skia::Color::WHITE);
        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

        let image: RgbaImage = ImageBuffer::from_raw(width, height, pixmap.take())
            .ok_or_else(|| anyhow!("pixmap does not fit a {width}x{height} image"))?;
        let mut png = Cursor::new(Vec::new());
        image
            .write_to(&mut png, ImageFormat::Png)
            .context("encode png")?;
        Ok(png.into_inner())
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rasterizer")
            .field("fonts", &self.options.fontdb.len())
            .finish()
    }
}
