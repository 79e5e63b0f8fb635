//! Arena layout: bounds, static obstacles, spawn points.
//!
//! An arena is immutable for the duration of a session.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::geometry::Rect;
use crate::types::ObstacleId;

/// A static axis-aligned obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Arena {
    pub bounds: Rect,
    pub obstacles: Vec<Obstacle>,
    /// Enemy spawn points, cycled by the wave director.
    pub spawn_points: Vec<DVec2>,
    pub player_start: DVec2,
}

impl Default for Arena {
    fn default() -> Self {
        Self::open(ARENA_WIDTH, ARENA_HEIGHT)
    }
}

impl Arena {
    /// An obstacle-free arena centred on the origin with eight edge spawn points.
    pub fn open(width: f64, height: f64) -> Self {
        let half = DVec2::new(width * 0.5, height * 0.5);
        let bounds = Rect::new(-half, half);
        Self {
            bounds,
            obstacles: Vec::new(),
            spawn_points: edge_spawn_points(&bounds, 40.0),
            player_start: DVec2::ZERO,
        }
    }

    /// Add an obstacle, assigning the next obstacle id.
    pub fn with_obstacle(mut self, rect: Rect) -> Self {
        let id = self.obstacles.len() as ObstacleId;
        self.obstacles.push(Obstacle { id, rect });
        self
    }

    /// The first obstacle containing `point`, if any.
    pub fn obstacle_at(&self, point: DVec2) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.rect.contains(point))
    }

    /// Inside bounds and outside every obstacle.
    pub fn is_open(&self, point: DVec2) -> bool {
        self.bounds.contains(point) && self.obstacle_at(point).is_none()
    }

    /// Whether the straight walk from `from` to `to` stays open, checked
    /// every `step` units and at both ends.
    pub fn segment_is_open(&self, from: DVec2, to: DVec2, step: f64) -> bool {
        let length = from.distance(to);
        let samples = (length / step.max(1.0)).ceil().max(1.0) as u32;
        (0..=samples).all(|i| self.is_open(from.lerp(to, i as f64 / samples as f64)))
    }
}

/// Corner and mid-edge points inset by `margin`, in clockwise order from the top-left.
fn edge_spawn_points(bounds: &Rect, margin: f64) -> Vec<DVec2> {
    let lo = bounds.min + DVec2::splat(margin);
    let hi = bounds.max - DVec2::splat(margin);
    let mid = bounds.center();
    vec![
        DVec2::new(lo.x, hi.y),
        DVec2::new(mid.x, hi.y),
        DVec2::new(hi.x, hi.y),
        DVec2::new(hi.x, mid.y),
        DVec2::new(hi.x, lo.y),
        DVec2::new(mid.x, lo.y),
        DVec2::new(lo.x, lo.y),
        DVec2::new(lo.x, mid.y),
    ]
}
