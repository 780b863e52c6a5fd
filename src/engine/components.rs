// ECS components and resources shared by the race systems.
// Kart physics state itself lives in `race::kart::Kart`, also a component.

use bevy_ecs::prelude::*;

use crate::race::{Character, Controls};

/// Who a kart is and where it started on the grid.
///
/// `slot` also fixes iteration order wherever order matters (pickups,
/// deciding the winner): lower slots go first.
#[derive(Component, Debug, Clone, Copy)]
pub struct Racer {
    pub character: Character,
    pub slot: usize,
}

/// Where a kart's controls come from each frame.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    Human,
    Ai,
}

/// Per-frame inputs sampled by the window loop.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Seconds since the previous frame.
    pub dt: f32,
    pub human: Controls,
}

/// Set once, by the first kart to finish.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct RaceOutcome {
    pub winner: Option<Character>,
}
