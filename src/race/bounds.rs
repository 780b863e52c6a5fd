// Keeps karts inside the track corridor.
//
// The walls are circles around the track center: the outer radius is the
// outer ellipse's half-width and the inner radius the inner ellipse's
// half-width. On a non-circular track that lets karts wander past the
// drawn edges at the top and bottom; that matches how the game has
// always played.

use bevy_ecs::prelude::*;
use glam::Vec2;

use super::config::RaceConfig;
use super::kart::Kart;

/// Speed kept after scraping the outer wall.
pub const OUTER_WALL_SPEED_FACTOR: f32 = 0.4;
/// Speed kept after scraping the infield.
pub const INNER_WALL_SPEED_FACTOR: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Outer,
    Inner,
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct CollisionBounds {
    pub center: Vec2,
    pub outer_limit: f32,
    pub inner_limit: f32,
}

impl CollisionBounds {
    pub fn new(center: Vec2, outer_limit: f32, inner_limit: f32) -> Self {
        Self {
            center,
            outer_limit,
            inner_limit,
        }
    }

    pub fn from_config(config: &RaceConfig) -> Self {
        let (outer, inner) = config.collision_radii();
        Self::new(config.track_center(), outer, inner)
    }

    /// Push the kart back inside the corridor and bleed its speed.
    ///
    /// Both walls are tested against the distance measured before any
    /// correction. A kart exactly on the center has no direction to be
    /// pushed in and is left alone.
    pub fn clamp(&self, kart: &mut Kart) -> Option<Contact> {
        let offset = kart.position - self.center;
        if offset.length_squared() == 0.0 {
            return None;
        }
        let distance = offset.length();
        let mut contact = None;

        if distance > self.outer_limit {
            kart.position = self.center + offset * (self.outer_limit / distance);
            kart.speed *= OUTER_WALL_SPEED_FACTOR;
            contact = Some(Contact::Outer);
        }
        if distance < self.inner_limit {
            kart.position = self.center + offset * (self.inner_limit / distance);
            kart.speed *= INNER_WALL_SPEED_FACTOR;
            contact = Some(Contact::Inner);
        }
        contact
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> CollisionBounds {
        CollisionBounds::from_config(&RaceConfig::default())
    }

    fn kart_at(pos: Vec2, speed: f32) -> Kart {
        let mut kart = Kart::new(pos, 0.0);
        kart.speed = speed;
        kart
    }

    #[test]
    fn kart_in_corridor_is_untouched() {
        let b = bounds();
        let mut kart = kart_at(Vec2::new(480.0 + 360.0, 320.0), 100.0);
        assert_eq!(b.clamp(&mut kart), None);
        assert_eq!(kart.position, Vec2::new(840.0, 320.0));
        assert_eq!(kart.speed, 100.0);
    }

    #[test]
    fn outer_wall_pulls_back_and_slows() {
        let b = bounds();
        let mut kart = kart_at(Vec2::new(480.0 + 500.0, 320.0), 200.0);
        assert_eq!(b.clamp(&mut kart), Some(Contact::Outer));
        assert!((kart.position.x - 880.0).abs() < 1e-3);
        assert!((kart.position.y - 320.0).abs() < 1e-3);
        assert!((kart.speed - 80.0).abs() < 1e-3);
    }

    #[test]
    fn inner_wall_pushes_out_and_slows() {
        let b = bounds();
        let mut kart = kart_at(Vec2::new(480.0, 320.0 - 100.0), 100.0);
        assert_eq!(b.clamp(&mut kart), Some(Contact::Inner));
        assert!((kart.position.x - 480.0).abs() < 1e-3);
        assert!((kart.position.y - 0.0).abs() < 1e-3);
        assert!((kart.speed - 50.0).abs() < 1e-3);
    }

    #[test]
    fn clamp_is_idempotent() {
        let b = bounds();
        for start in [
            Vec2::new(1000.0, 900.0),
            Vec2::new(-200.0, 30.0),
            Vec2::new(500.0, 330.0),
            Vec2::new(470.0, 100.0),
        ] {
            let mut kart = kart_at(start, 120.0);
            b.clamp(&mut kart);
            let once = kart.position;
            b.clamp(&mut kart);
            assert!(
                kart.position.distance(once) < 1e-3,
                "{:?} moved from {:?} to {:?}",
                start,
                once,
                kart.position
            );
        }
    }

    #[test]
    fn kart_at_center_is_left_alone() {
        let b = bounds();
        let mut kart = kart_at(b.center, 75.0);
        assert_eq!(b.clamp(&mut kart), None);
        assert_eq!(kart.position, b.center);
        assert_eq!(kart.speed, 75.0);
    }

    #[test]
    fn degenerate_limits_check_both_walls() {
        // Inner radius beyond the outer one: a far kart hits both.
        let b = CollisionBounds::new(Vec2::ZERO, 10.0, 20.0);
        let mut kart = kart_at(Vec2::new(15.0, 0.0), 100.0);
        assert_eq!(b.clamp(&mut kart), Some(Contact::Inner));
        assert!((kart.position.x - 20.0).abs() < 1e-4);
        assert!((kart.speed - 20.0).abs() < 1e-3);
    }
}
