//! Logical coordinate space and geometry helpers
//!
//! ## Coordinate System
//!
//! - Horizontal: 0 = left edge, 255 = right edge
//! - Altitude: 0 = ground, 231 = top of the playfield (vertical axis points UP,
//!   inverted relative to screen coordinates)
//!
//! Bearings used by the sensor are measured in degrees from "straight up",
//! increasing clockwise (towards +horizontal).

use serde::{Deserialize, Serialize};

/// Point in logical playfield coordinates.
///
/// No bounds are enforced here; callers clamp before giving a position
/// physical meaning (e.g. altitude below the launch pad).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate (0-255)
    pub horizontal: f64,
    /// Altitude coordinate (0-231, up is positive)
    pub altitude: f64,
}

impl Position {
    pub const fn new(horizontal: f64, altitude: f64) -> Self {
        Self { horizontal, altitude }
    }

    /// Project this point along a sensor bearing.
    ///
    /// `bearing_deg` is measured from straight up, clockwise positive.
    #[inline]
    pub fn offset_by_bearing(&self, bearing_deg: f64, depth: f64) -> Position {
        let rad = degrees_to_radians(bearing_deg);
        Position::new(self.horizontal + rad.sin() * depth, self.altitude + rad.cos() * depth)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3},{:.3})", self.horizontal, self.altitude)
    }
}

// =============================================================================
// Triangle test
// =============================================================================

/// Whether `p` lies inside (or on the edge of) triangle `a`, `b`, `c`.
///
/// Every edge cross-product is multiplied by the triangle determinant, so the
/// result does not depend on the vertex winding order. A degenerate triangle
/// (zero determinant) accepts every point.
pub fn point_in_triangle(p: Position, a: Position, b: Position, c: Position) -> bool {
    let det = (b.horizontal - a.horizontal) * (c.altitude - a.altitude)
        - (b.altitude - a.altitude) * (c.horizontal - a.horizontal);

    det * edge_side(a, b, p) >= 0.0
        && det * edge_side(b, c, p) >= 0.0
        && det * edge_side(c, a, p) >= 0.0
}

/// Signed side of `p` relative to the directed edge `from -> to`.
///
/// Always evaluated from the lexicographically smaller endpoint, so
/// `edge_side(a, b, p) == -edge_side(b, a, p)` bit for bit. Two triangles
/// sharing an edge therefore never both reject a point on it.
#[inline]
fn edge_side(from: Position, to: Position, p: Position) -> f64 {
    let swapped = (from.horizontal, from.altitude) > (to.horizontal, to.altitude);
    let (origin, end) = if swapped { (to, from) } else { (from, to) };
    let side = (end.horizontal - origin.horizontal) * (p.altitude - origin.altitude)
        - (end.altitude - origin.altitude) * (p.horizontal - origin.horizontal);
    if swapped {
        -side
    } else {
        side
    }
}

// =============================================================================
// Angles
// =============================================================================

/// Wrap an angle into [0, 360).
///
/// Adds or subtracts a single full turn, so the input must already be within
/// one turn of the range.
pub fn normalize_degrees_360(angle_deg: f64) -> f64 {
    let mut angle = angle_deg;
    if angle < 0.0 {
        angle += 360.0;
    }
    if angle >= 360.0 {
        angle -= 360.0;
    }
    angle
}

#[inline]
pub fn degrees_to_radians(angle_deg: f64) -> f64 {
    std::f64::consts::PI * angle_deg / 180.0
}

#[inline]
pub fn radians_to_degrees(angle_rad: f64) -> f64 {
    angle_rad * 180.0 / std::f64::consts::PI
}

// =============================================================================
// Distances
// =============================================================================

/// Euclidean distance between two points.
pub fn distance(p1: Position, p2: Position) -> f64 {
    let dx = p2.horizontal - p1.horizontal;
    let dy = p2.altitude - p1.altitude;
    (dx * dx + dy * dy).sqrt()
}

/// Clamp `value` into `[min, max]`.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
