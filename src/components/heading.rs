//! Movement direction and coarse facing.

use bevy_ecs::prelude::Component;

use crate::geometry::Vector2;

/// Four-way facing used to pick animation tracks and weapon placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Up, Facing::Down, Facing::Left, Facing::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            Facing::Up => "up",
            Facing::Down => "down",
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }

    /// Facing for a raw direction. Horizontal input wins over vertical.
    pub fn from_vector(v: Vector2) -> Option<Facing> {
        if v.x < 0.0 {
            Some(Facing::Left)
        } else if v.x > 0.0 {
            Some(Facing::Right)
        } else if v.y < 0.0 {
            Some(Facing::Up)
        } else if v.y > 0.0 {
            Some(Facing::Down)
        } else {
            None
        }
    }
}

/// Normalized movement direction (length 0 or 1) plus the last facing.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Heading {
    pub direction: Vector2,
    pub facing: Facing,
}

impl Heading {
    pub fn facing(facing: Facing) -> Self {
        Self {
            direction: Vector2::zero(),
            facing,
        }
    }

    /// Sets the direction from a raw vector. Facing only changes for a
    /// non-zero vector.
    pub fn set_direction(&mut self, raw: Vector2) {
        self.direction = raw.normalized();
        if let Some(facing) = Facing::from_vector(raw) {
            self.facing = facing;
        }
    }

    pub fn stop(&mut self) {
        self.direction = Vector2::zero();
    }

    pub fn is_moving(&self) -> bool {
        !self.direction.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_direction_is_normalized_and_faces_horizontally() {
        let mut h = Heading::default();
        h.set_direction(Vector2::new(1.0, -1.0));
        assert!((h.direction.length() - 1.0).abs() < 1e-6);
        assert_eq!(h.facing, Facing::Right);
    }

    #[test]
    fn stopping_keeps_facing() {
        let mut h = Heading::default();
        h.set_direction(Vector2::new(0.0, -1.0));
        h.stop();
        assert!(!h.is_moving());
        assert_eq!(h.facing, Facing::Up);
    }
}
