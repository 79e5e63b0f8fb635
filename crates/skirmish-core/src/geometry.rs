//! Geometry helpers: distances, directions, overlap tests.
//!
//! All positions are `glam::DVec2` in world units, x to the right and y up.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, `min` inclusive and `max` exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: DVec2,
    pub max: DVec2,
}

impl Rect {
    /// Build a rectangle from any two opposite corners.
    pub fn new(a: DVec2, b: DVec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_size(origin: DVec2, size: DVec2) -> Self {
        Self::new(origin, origin + size)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// Point/rectangle overlap.
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.min.x
            && point.x < self.max.x
            && point.y >= self.min.y
            && point.y < self.max.y
    }

    /// Clamp a point so a circle of `radius` centred on it stays inside.
    pub fn clamp_inside(&self, point: DVec2, radius: f64) -> DVec2 {
        let lo = self.min + DVec2::splat(radius);
        let hi = (self.max - DVec2::splat(radius)).max(lo);
        point.clamp(lo, hi)
    }
}

/// Euclidean distance between two points.
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    a.distance(b)
}

/// Angle of the vector from `from` to `to` in radians (atan2, x axis = 0).
/// Returns `None` when the points coincide.
pub fn angle_to(from: DVec2, to: DVec2) -> Option<f64> {
    let d = to - from;
    if d.length_squared() == 0.0 {
        None
    } else {
        Some(d.y.atan2(d.x))
    }
}

/// Unit direction from `from` to `to`, or `fallback` when they coincide.
pub fn direction_or(from: DVec2, to: DVec2, fallback: DVec2) -> DVec2 {
    normalize_or(to - from, fallback)
}

/// Normalize `v`, or return `fallback` for a zero-length (or non-finite) vector.
pub fn normalize_or(v: DVec2, fallback: DVec2) -> DVec2 {
    v.try_normalize().unwrap_or(fallback)
}

/// Unit vector for an angle in radians.
pub fn from_angle(angle: f64) -> DVec2 {
    DVec2::new(angle.cos(), angle.sin())
}

/// Circle-circle overlap: centre distance strictly less than the sum of radii.
pub fn circles_overlap(a: DVec2, radius_a: f64, b: DVec2, radius_b: f64) -> bool {
    let reach = radius_a + radius_b;
    a.distance_squared(b) < reach * reach
}

/// Move from `from` toward `to` by at most `max_step`, never overshooting.
pub fn step_toward(from: DVec2, to: DVec2, max_step: f64) -> DVec2 {
    let delta = to - from;
    let dist = delta.length();
    if dist <= max_step || dist == 0.0 {
        to
    } else {
        from + delta / dist * max_step
    }
}
