//! Axis-aligned geometry for bricks, paddle, ball and power-ups
//!
//! Screen space: origin at the top-left corner, y grows downward. Every
//! entity stores the top-left corner of its bounding box.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub position: Vec2,
    /// Width and height (never negative)
    pub size: Vec2,
}

impl Aabb {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size: size.max(Vec2::ZERO),
        }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + self.half_extents()
    }

    /// Box-vs-box overlap; touching edges count as overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let collision_x = self.position.x + self.size.x >= other.position.x
            && other.position.x + other.size.x >= self.position.x;
        let collision_y = self.position.y + self.size.y >= other.position.y
            && other.position.y + other.size.y >= self.position.y;
        collision_x && collision_y
    }
}

/// A circle given by its center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

/// Compass direction of a contact, in screen-space vector terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Enumeration order doubles as the tie-break order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, 1.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Down => Vec2::new(0.0, -1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Classify a vector by the compass direction it points closest to.
///
/// Uses a strict `>` so the first direction in `Direction::ALL` wins ties.
/// A zero vector has no positive match and falls back to `Up`.
pub fn vector_direction(target: Vec2) -> Direction {
    let normalized = target.normalize_or_zero();
    let mut max = 0.0_f32;
    let mut best = Direction::Up;
    for direction in Direction::ALL {
        let dot = normalized.dot(direction.unit());
        if dot > max {
            max = dot;
            best = direction;
        }
    }
    best
}

/// Result of a circle-vs-box test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Which side the closest point lies on, seen from the circle center
    pub direction: Direction,
    /// Vector from circle center to the closest point on the box
    pub difference: Vec2,
}

/// Circle-vs-AABB overlap.
///
/// The closest point on the box is found by clamping the center-to-center
/// vector into the box half extents. Overlap when its distance to the circle
/// center is at most the radius.
pub fn circle_aabb_contact(circle: Circle, aabb: &Aabb) -> Option<Contact> {
    let half = aabb.half_extents();
    let aabb_center = aabb.center();
    let clamped = (circle.center - aabb_center).clamp(-half, half);
    let closest = aabb_center + clamped;
    let difference = closest - circle.center;

    if difference.length() <= circle.radius {
        Some(Contact {
            direction: vector_direction(difference),
            difference,
        })
    } else {
        None
    }
}
