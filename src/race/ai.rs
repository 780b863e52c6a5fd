// Computer driver: chase a point a little further along the racing line.

use super::kart::{Controls, Kart};
use super::track::TrackPath;

/// How far ahead along the lap (as a fraction) the AI aims.
pub const LOOKAHEAD: f32 = 0.03;
/// Heading error that maps to full steering lock.
const FULL_LOCK_ANGLE: f32 = 45.0;
/// Beyond this heading error the AI eases off the throttle.
const SHARP_TURN_ANGLE: f32 = 90.0;
const SHARP_TURN_THROTTLE: f32 = 0.5;

/// Wrap an angle in degrees into (-180, 180].
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 { wrapped + 360.0 } else { wrapped }
}

/// Steering and throttle for an AI kart. Never brakes or reverses.
pub fn ai_steer(kart: &Kart, track: &TrackPath) -> Controls {
    let target = track.point(track.index_ahead(kart.progress, LOOKAHEAD));
    let to_target = target - kart.position;
    let desired = to_target.y.atan2(to_target.x).to_degrees();
    let angle_diff = wrap_degrees(desired - kart.heading);

    let turning = (angle_diff / FULL_LOCK_ANGLE).clamp(-1.0, 1.0);
    let throttle = if angle_diff.abs() < SHARP_TURN_ANGLE { 1.0 } else { SHARP_TURN_THROTTLE };
    Controls { turning, throttle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::race::config::RaceConfig;
    use glam::Vec2;

    #[test]
    fn wrap_lands_in_half_open_range() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(180.0), 180.0);
        assert_eq!(wrap_degrees(-180.0), 180.0);
        assert_eq!(wrap_degrees(270.0), -90.0);
        assert_eq!(wrap_degrees(-270.0), 90.0);
        assert_eq!(wrap_degrees(540.0), 180.0);
        assert!((wrap_degrees(-190.0) - 170.0).abs() < 1e-4);
    }

    #[test]
    fn target_dead_ahead_is_full_throttle() {
        let track = TrackPath::from_points(vec![Vec2::new(100.0, 0.0), Vec2::new(200.0, 0.0)]);
        let kart = Kart::new(Vec2::ZERO, 0.0);
        let controls = ai_steer(&kart, &track);
        assert_eq!(controls.turning, 0.0);
        assert_eq!(controls.throttle, 1.0);
    }

    #[test]
    fn target_directly_behind_saturates_steering() {
        // Progress 0 with two samples looks ahead to index 0.
        let track = TrackPath::from_points(vec![Vec2::new(-100.0, 0.0), Vec2::new(-200.0, 0.0)]);
        let kart = Kart::new(Vec2::ZERO, 0.0);
        let controls = ai_steer(&kart, &track);
        assert_eq!(controls.turning.abs(), 1.0);
        assert_eq!(controls.throttle, SHARP_TURN_THROTTLE);
    }

    #[test]
    fn gentle_correction_is_proportional() {
        // Target 22.5 degrees clockwise of the heading.
        let angle = 22.5_f32.to_radians();
        let track = TrackPath::from_points(vec![Vec2::new(angle.cos(), angle.sin()) * 100.0]);
        let kart = Kart::new(Vec2::ZERO, 0.0);
        let controls = ai_steer(&kart, &track);
        assert!((controls.turning - 0.5).abs() < 1e-4);
        assert_eq!(controls.throttle, 1.0);
    }

    #[test]
    fn aims_just_ahead_on_the_real_track() {
        let config = RaceConfig::default();
        let track = TrackPath::from_config(&config);
        let mut kart = Kart::new(track.point(5), 0.0);
        kart.progress = 5.0 / 40.0;
        let to_target = track.point(6) - kart.position;
        kart.heading = to_target.y.atan2(to_target.x).to_degrees();
        let controls = ai_steer(&kart, &track);
        assert!(controls.turning.abs() < 1e-3);
        assert_eq!(controls.throttle, 1.0);
    }
}
