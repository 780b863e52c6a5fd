// Racing line sampled around the track ellipse.
//
// Built once per race and shared read-only by every kart. Progress is the
// index of the nearest sample divided by the sample count, so it lands on
// a fixed grid of N values in [0, 1).

use bevy_ecs::prelude::*;
use glam::Vec2;
use std::f32::consts::TAU;

use super::config::RaceConfig;

/// Ordered, closed sequence of racing-line samples.
#[derive(Resource, Debug, Clone)]
pub struct TrackPath {
    points: Vec<Vec2>,
}

impl TrackPath {
    /// Sample an ellipse at `segments` equally spaced parameter angles,
    /// starting at angle 0 (the rightmost point). With y growing downward
    /// this walks the track clockwise on screen.
    pub fn ellipse(center: Vec2, half_extents: Vec2, segments: usize) -> Self {
        let points = (0..segments)
            .map(|i| {
                let angle = i as f32 / segments as f32 * TAU;
                center + Vec2::new(angle.cos() * half_extents.x, angle.sin() * half_extents.y)
            })
            .collect();
        Self::from_points(points)
    }

    pub fn from_config(config: &RaceConfig) -> Self {
        Self::ellipse(
            config.track_center(),
            config.outer_half_extents(),
            config.path_segments,
        )
    }

    pub fn from_points(points: Vec<Vec2>) -> Self {
        assert!(!points.is_empty(), "track path needs at least one sample");
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn point(&self, index: usize) -> Vec2 {
        self.points[index % self.points.len()]
    }

    /// Index of the sample closest to `pos`. Exact ties go to the lowest index.
    pub fn nearest_index(&self, pos: Vec2) -> usize {
        let mut closest = 0;
        let mut min_dist = f32::INFINITY;
        for (i, point) in self.points.iter().enumerate() {
            let dist = point.distance_squared(pos);
            if dist < min_dist {
                min_dist = dist;
                closest = i;
            }
        }
        closest
    }

    /// Fraction of the lap at `pos`, in [0, 1).
    pub fn progress_of(&self, pos: Vec2) -> f32 {
        self.nearest_index(pos) as f32 / self.points.len() as f32
    }

    /// Sample index a little ahead of `progress`, wrapping past the seam.
    pub fn index_ahead(&self, progress: f32, lookahead: f32) -> usize {
        let n = self.len();
        ((progress + lookahead) * n as f32).floor() as usize % n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_path() -> TrackPath {
        TrackPath::from_config(&RaceConfig::default())
    }

    #[test]
    fn samples_forty_points_starting_on_the_right() {
        let path = default_path();
        assert_eq!(path.len(), 40);
        let first = path.point(0);
        assert!((first.x - 880.0).abs() < 1e-3);
        assert!((first.y - 320.0).abs() < 1e-3);

        // A quarter of the way round is the bottom of the screen.
        let quarter = path.point(10);
        assert!((quarter.x - 480.0).abs() < 1e-2);
        assert!((quarter.y - 560.0).abs() < 1e-3);
    }

    #[test]
    fn progress_is_the_nearest_sample_fraction() {
        let path = default_path();
        for i in 0..path.len() {
            let pos = path.point(i) + Vec2::new(0.5, -0.5);
            assert_eq!(path.progress_of(pos), i as f32 / 40.0);
        }
    }

    #[test]
    fn progress_depends_only_on_position() {
        let path = default_path();
        let pos = Vec2::new(612.3, 145.9);
        let first = path.progress_of(pos);
        let shared = path.clone();
        assert_eq!(shared.progress_of(pos), first);
        assert_eq!(path.progress_of(pos), first);
    }

    #[test]
    fn exact_tie_picks_lowest_index() {
        let path = TrackPath::from_points(vec![
            Vec2::new(10.0, 0.0),
            Vec2::new(-10.0, 0.0),
            Vec2::new(0.0, 50.0),
        ]);
        assert_eq!(path.nearest_index(Vec2::ZERO), 0);

        let path = TrackPath::from_points(vec![
            Vec2::new(0.0, 50.0),
            Vec2::new(-10.0, 0.0),
            Vec2::new(10.0, 0.0),
        ]);
        assert_eq!(path.nearest_index(Vec2::ZERO), 1);
    }

    #[test]
    fn lookahead_wraps_past_the_seam() {
        let path = default_path();
        assert_eq!(path.index_ahead(0.0, 0.03), 1);
        assert_eq!(path.index_ahead(0.5, 0.03), 21);
        assert_eq!(path.index_ahead(0.975, 0.03), 0);
    }
}
