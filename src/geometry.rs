//! Geometry kernel: points, segment intersection, and distance helpers.
//!
//! The intersection predicate is deliberately simple rather than a general
//! robust-geometry routine: segments that share an exact endpoint do not
//! cross, and parallel segments (including collinear overlap) do not cross.
//! Everything else is resolved by Cramer's rule on the two direction
//! vectors.

/// A continuous 2D position.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

impl From<GridPoint> for Point {
    fn from(p: GridPoint) -> Self {
        Point {
            x: p.x as f64,
            y: p.y as f64,
        }
    }
}

/// An integer grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub fn new(x: i32, y: i32) -> Self {
        GridPoint { x, y }
    }

    /// The cell displaced by `(dx, dy)`.
    pub fn offset(self, dx: i32, dy: i32) -> GridPoint {
        GridPoint {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Manhattan distance to another cell.
    pub fn manhattan(self, other: GridPoint) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Euclidean distance to another cell.
    pub fn distance(self, other: GridPoint) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(i32, i32)> for GridPoint {
    fn from((x, y): (i32, i32)) -> Self {
        GridPoint { x, y }
    }
}

/// Manhattan distance between two continuous points.
pub fn manhattan(a: Point, b: Point) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

fn det(a: (f64, f64), b: (f64, f64)) -> f64 {
    a.0 * b.1 - a.1 * b.0
}

/// Whether segment `(p1, p2)` properly crosses segment `(p3, p4)`.
///
/// Segments sharing an exact endpoint do not cross, and parallel segments
/// (zero cross product of direction vectors, collinear overlap included)
/// do not cross. Otherwise the intersection parameters `t1`, `t2` are
/// computed via Cramer's rule and a crossing is reported iff both lie in
/// `[0, 1]`.
pub fn segments_intersect(p1: Point, p2: Point, p3: Point, p4: Point) -> bool {
    if p1 == p3 || p1 == p4 || p2 == p3 || p2 == p4 {
        return false;
    }

    let v1 = (p2.x - p1.x, p2.y - p1.y);
    let v2 = (p4.x - p3.x, p4.y - p3.y);
    let v3 = (p3.x - p1.x, p3.y - p1.y);

    let cross = det(v1, v2);
    if cross == 0.0 {
        return false;
    }

    let t1 = det(v3, v2) / cross;
    let t2 = det(v3, v1) / cross;
    (0.0..=1.0).contains(&t1) && (0.0..=1.0).contains(&t2)
}

/// Whether grid cell `p` lies exactly on the segment from `a` to `b`.
///
/// Collinearity via the integer cross product, plus containment in the
/// segment's axis-aligned bounding box.
pub fn point_on_segment(p: GridPoint, a: GridPoint, b: GridPoint) -> bool {
    let cross = (b.x - a.x) as i64 * (p.y - a.y) as i64 - (b.y - a.y) as i64 * (p.x - a.x) as i64;
    if cross != 0 {
        return false;
    }
    a.x.min(b.x) <= p.x && p.x <= a.x.max(b.x) && a.y.min(b.y) <= p.y && p.y <= a.y.max(b.y)
}
