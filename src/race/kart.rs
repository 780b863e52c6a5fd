// Per-racer kart state and the per-frame integration step.

use bevy_ecs::prelude::*;
use glam::Vec2;

use super::powerup::Effect;
use super::track::TrackPath;

// ============================================================================
// TUNING
// ============================================================================

pub const BASE_MAX_SPEED: f32 = 260.0;
/// Lowest speed allowed while reversing.
pub const REVERSE_LIMIT: f32 = -80.0;
pub const BASE_ACCELERATION: f32 = 200.0;
/// Speed lost per second while coasting.
pub const DRAG: f32 = 90.0;
/// Degrees per second at full steer and full speed.
pub const TURN_SPEED: f32 = 160.0;

pub const BOOST_SPEED_MULTIPLIER: f32 = 1.7;
pub const BOOST_ACCEL_MULTIPLIER: f32 = 1.5;
pub const SLOW_MULTIPLIER: f32 = 0.4;

pub const BOOST_DURATION: f32 = 2.2;
pub const SLOW_DURATION: f32 = 2.0;

/// Timer remainders below this count as expired. Summing frame times in
/// f32 leaves a few microseconds behind.
const TIMER_EPSILON: f32 = 1e-4;

/// Progress must fall from above this...
const LAP_SEAM_HIGH: f32 = 0.8;
/// ...to below this in one update for a lap to count.
const LAP_SEAM_LOW: f32 = 0.2;

// ============================================================================
// CONTROLS
// ============================================================================

/// Steering and throttle intent for one frame, both in [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Controls {
    /// Negative steers counter-clockwise on screen.
    pub turning: f32,
    /// Zero means coast.
    pub throttle: f32,
}

impl Controls {
    pub fn new(turning: f32, throttle: f32) -> Self {
        Self { turning, throttle }
    }
}

/// Top speed and acceleration after status effects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    pub max_speed: f32,
    pub acceleration: f32,
}

// ============================================================================
// KART
// ============================================================================

#[derive(Component, Debug, Clone, Copy)]
pub struct Kart {
    pub position: Vec2,
    /// Degrees. 0 faces +x, positive turns clockwise on screen.
    pub heading: f32,
    /// Signed; negative while reversing.
    pub speed: f32,
    /// Seconds of boost left, 0 when inactive.
    pub boost_timer: f32,
    /// Seconds of slowdown left, 0 when inactive.
    pub slow_timer: f32,
    /// Completed laps.
    pub lap: u32,
    /// Last computed fraction of the racing line.
    pub progress: f32,
}

impl Kart {
    pub fn new(position: Vec2, heading: f32) -> Self {
        Self {
            position,
            heading,
            speed: 0.0,
            boost_timer: 0.0,
            slow_timer: 0.0,
            lap: 0,
            progress: 0.0,
        }
    }

    /// Limits for the currently active effects. Boost and slow are checked
    /// independently, so both at once compound.
    pub fn limits(&self) -> Limits {
        let mut max_speed = BASE_MAX_SPEED;
        let mut acceleration = BASE_ACCELERATION;
        if self.boost_timer > 0.0 {
            max_speed *= BOOST_SPEED_MULTIPLIER;
            acceleration *= BOOST_ACCEL_MULTIPLIER;
        }
        if self.slow_timer > 0.0 {
            max_speed *= SLOW_MULTIPLIER;
            acceleration *= SLOW_MULTIPLIER;
        }
        Limits { max_speed, acceleration }
    }

    /// Advance the kart by `dt` seconds.
    ///
    /// Effect timers tick down first, so an effect that expires during this
    /// frame no longer shapes it. Turning is scaled by the fraction of top
    /// speed the kart is doing, which also mirrors the steering in reverse.
    pub fn update(&mut self, dt: f32, controls: Controls) {
        self.boost_timer = decay_timer(self.boost_timer, dt);
        self.slow_timer = decay_timer(self.slow_timer, dt);

        let Limits { max_speed, acceleration } = self.limits();

        self.speed += controls.throttle * acceleration * dt;
        if controls.throttle == 0.0 && self.speed != 0.0 {
            self.speed -= self.speed.abs().min(DRAG * dt) * self.speed.signum();
        }
        self.speed = self.speed.clamp(REVERSE_LIMIT, max_speed);

        if self.speed != 0.0 {
            self.heading += controls.turning * TURN_SPEED * dt * (self.speed / max_speed);
        }

        let radians = self.heading.to_radians();
        self.position += Vec2::new(radians.cos(), radians.sin()) * self.speed * dt;
    }

    /// Start (or restart) a timed effect. Timers are overwritten, never summed.
    pub fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Boost => self.boost_timer = BOOST_DURATION,
            Effect::Slow => self.slow_timer = SLOW_DURATION,
        }
    }

    /// Refresh `progress` from the racing line. Returns true when this call
    /// carried the kart across the start line and completed a lap.
    pub fn update_progress(&mut self, track: &TrackPath) -> bool {
        let previous = self.progress;
        self.progress = track.progress_of(self.position);
        let crossed = previous > LAP_SEAM_HIGH && self.progress < LAP_SEAM_LOW;
        if crossed {
            self.lap += 1;
        }
        crossed
    }
}

fn decay_timer(timer: f32, dt: f32) -> f32 {
    let left = timer - dt;
    if left < TIMER_EPSILON { 0.0 } else { left }
}
