//! Province geometry types.

/// A map coordinate: longitude in `x`, latitude in `y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Bounds of a point set, `None` when empty.
    pub fn of_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for point in iter {
            bounds.include(*point);
        }
        Some(bounds)
    }

    pub fn include(&mut self, point: Point) {
        self.min_x = self.min_x.min(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_x = self.max_x.max(point.x);
        self.max_y = self.max_y.max(point.y);
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/// One polygon: an outer ring and zero or more holes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub exterior: Vec<Point>,
    pub holes: Vec<Vec<Point>>,
}

impl Polygon {
    pub fn new(exterior: Vec<Point>) -> Self {
        Self {
            exterior,
            holes: Vec::new(),
        }
    }

    /// Every ring, exterior first.
    pub fn rings(&self) -> impl Iterator<Item = &[Point]> {
        std::iter::once(self.exterior.as_slice()).chain(self.holes.iter().map(Vec::as_slice))
    }
}

/// A named province and its geometry. Shapes without polygons are kept so
/// they still take part in the join.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvinceShape {
    pub name: String,
    pub polygons: Vec<Polygon>,
}

impl ProvinceShape {
    pub fn new(name: impl Into<String>, polygons: Vec<Polygon>) -> Self {
        Self {
            name: name.into(),
            polygons,
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.polygons
            .iter()
            .filter_map(|polygon| Bounds::of_points(&polygon.exterior))
            .reduce(Bounds::union)
    }

    /// Area-weighted centroid of the exterior rings.
    ///
    /// Degenerate geometry (zero total area) falls back to the bounding box
    /// center; a shape without polygons has no centroid.
    pub fn centroid(&self) -> Option<Point> {
        let mut area = 0.0;
        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        for polygon in &self.polygons {
            let (signed, mx, my) = ring_moments(&polygon.exterior);
            if signed.abs() <= f64::EPSILON {
                continue;
            }
            // Moments and area flip sign together with ring orientation.
            let cx = mx / (3.0 * signed);
            let cy = my / (3.0 * signed);
            area += signed.abs();
            sum_x += cx * signed.abs();
            sum_y += cy * signed.abs();
        }
        if area > f64::EPSILON {
            return Some(Point::new(sum_x / area, sum_y / area));
        }
        self.bounds().map(|bounds| bounds.center())
    }

    /// First three letters in upper case, used as the on-map label.
    pub fn abbreviation(&self) -> String {
        self.name.chars().take(3).flat_map(char::to_uppercase).collect()
    }
}

/// Signed shoelace area and first moments of a ring.
///
/// Returns `(A, Σ(xᵢ+xᵢ₊₁)·c, Σ(yᵢ+yᵢ₊₁)·c) / 2` where `c` is the cross
/// term, so the centroid is `moment / (3·A)`.
fn ring_moments(ring: &[Point]) -> (f64, f64, f64) {
    if ring.len() < 3 {
        return (0.0, 0.0, 0.0);
    }
    let mut area = 0.0;
    let mut mx = 0.0;
    let mut my = 0.0;
    for (i, a) in ring.iter().enumerate() {
        let b = ring[(i + 1) % ring.len()];
        let cross = a.x * b.y - b.x * a.y;
        area += cross;
        mx += (a.x + b.x) * cross;
        my += (a.y + b.y) * cross;
    }
    (area / 2.0, mx / 2.0, my / 2.0)
}

/// Every named province shape of the map, in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProvinceMap {
    pub shapes: Vec<ProvinceShape>,
}

impl ProvinceMap {
    pub fn new(shapes: Vec<ProvinceShape>) -> Self {
        Self { shapes }
    }

    pub fn get(&self, name: &str) -> Option<&ProvinceShape> {
        self.shapes.iter().find(|shape| shape.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().map(|shape| shape.name.as_str())
    }

    /// Bounds of the whole map, `None` when no shape has geometry.
    pub fn bounds(&self) -> Option<Bounds> {
        self.shapes
            .iter()
            .filter_map(ProvinceShape::bounds)
            .reduce(Bounds::union)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
