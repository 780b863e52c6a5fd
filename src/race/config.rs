// Race-wide tunables and the geometry derived from them.
// Everything here is fixed for the lifetime of a race.

use bevy_ecs::prelude::*;
use glam::Vec2;

/// Tunables for one race. Inserted into the race world as a resource.
#[derive(Resource, Debug, Clone)]
pub struct RaceConfig {
    /// Play area in screen units (y grows downward).
    pub arena: Vec2,
    /// Gap between the arena edge and the outer track ellipse.
    pub track_margin: f32,
    /// Width of the driveable corridor.
    pub track_width: f32,
    /// Sample points on the racing line.
    pub path_segments: usize,
    pub total_laps: u32,
    pub powerup_count: usize,
    /// How far inside the outer ellipse the pickup ring sits.
    pub powerup_ring_inset: f32,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            arena: Vec2::new(960.0, 640.0),
            track_margin: 80.0,
            track_width: 160.0,
            path_segments: 40,
            total_laps: 3,
            powerup_count: 5,
            powerup_ring_inset: 40.0,
        }
    }
}

impl RaceConfig {
    pub fn track_center(&self) -> Vec2 {
        self.arena / 2.0
    }

    /// Semi-axes of the outer track ellipse.
    pub fn outer_half_extents(&self) -> Vec2 {
        self.arena / 2.0 - Vec2::splat(self.track_margin)
    }

    /// Semi-axes of the inner (grass) ellipse.
    pub fn inner_half_extents(&self) -> Vec2 {
        self.outer_half_extents() - Vec2::splat(self.track_width / 2.0)
    }

    /// Semi-axes of the ring power-ups are dropped on.
    pub fn powerup_ring_half_extents(&self) -> Vec2 {
        self.outer_half_extents() - Vec2::splat(self.powerup_ring_inset)
    }

    /// Wall radii used by the collision clamp: the half-widths of the outer
    /// and inner ellipses, treated as circles around the track center.
    pub fn collision_radii(&self) -> (f32, f32) {
        (self.outer_half_extents().x, self.inner_half_extents().x)
    }

    /// Spawn position and heading (degrees) for a grid slot.
    pub fn grid_slot(&self, slot: usize) -> (Vec2, f32) {
        let heading = -90.0;
        let angle = (heading + 5.0 * slot as f32).to_radians();
        let radius = self.track_margin + self.track_width / 2.0;
        let position = self.track_center() + Vec2::new(angle.cos(), angle.sin()) * radius;
        (position, heading)
    }
}
