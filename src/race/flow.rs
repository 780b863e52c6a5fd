// Top-level game flow: pick a racer, race, show the result, repeat.
// The window loop owns a `GameFlow` and calls `advance` once per frame.

use rand::Rng;
use rand::seq::SliceRandom;

use super::character::{Character, ROSTER};
use super::config::RaceConfig;
use super::kart::Controls;
use super::session::RaceSession;

/// How long the results screen stays up without input.
pub const RESULTS_SECONDS: f32 = 6.0;

/// Menu and driving input for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowInput {
    pub previous: bool,
    pub next: bool,
    pub confirm: bool,
    pub drive: Controls,
}

pub enum GameFlow {
    Select { index: usize },
    Racing(Box<RaceSession>),
    Results { winner: Character, elapsed: f32 },
}

impl Default for GameFlow {
    fn default() -> Self {
        GameFlow::Select { index: 0 }
    }
}

impl GameFlow {
    pub fn name(&self) -> &'static str {
        match self {
            GameFlow::Select { .. } => "select",
            GameFlow::Racing(_) => "racing",
            GameFlow::Results { .. } => "results",
        }
    }

    pub fn advance(&mut self, dt: f32, input: FlowInput, rng: &mut impl Rng) {
        let next = match self {
            GameFlow::Select { index } => {
                let count = ROSTER.len();
                if input.next {
                    *index = (*index + 1) % count;
                }
                if input.previous {
                    *index = (*index + count - 1) % count;
                }
                if input.confirm {
                    let player = ROSTER[*index];
                    let rival = pick_rival(player, rng);
                    let session = RaceSession::new(RaceConfig::default(), player, rival, rng);
                    Some(GameFlow::Racing(Box::new(session)))
                } else {
                    None
                }
            }
            GameFlow::Racing(session) => session
                .step(dt, input.drive)
                .map(|winner| GameFlow::Results { winner, elapsed: 0.0 }),
            GameFlow::Results { elapsed, .. } => {
                *elapsed += dt;
                if input.confirm || *elapsed >= RESULTS_SECONDS {
                    Some(GameFlow::default())
                } else {
                    None
                }
            }
        };

        if let Some(next) = next {
            log::info!("game flow: {} -> {}", self.name(), next.name());
            *self = next;
        }
    }
}

/// Any roster character other than the player's, uniformly.
fn pick_rival(player: Character, rng: &mut impl Rng) -> Character {
    let others: Vec<Character> = ROSTER.iter().copied().filter(|c| *c != player).collect();
    *others.choose(rng).unwrap_or(&player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn press_next() -> FlowInput {
        FlowInput { next: true, ..Default::default() }
    }

    fn press_confirm() -> FlowInput {
        FlowInput { confirm: true, ..Default::default() }
    }

    #[test]
    fn select_cycles_through_the_roster() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut flow = GameFlow::default();
        for expected in [1, 2, 3, 0] {
            flow.advance(0.016, press_next(), &mut rng);
            assert!(matches!(flow, GameFlow::Select { index } if index == expected));
        }
        flow.advance(0.016, FlowInput { previous: true, ..Default::default() }, &mut rng);
        assert!(matches!(flow, GameFlow::Select { index: 3 }));
    }

    #[test]
    fn confirm_starts_a_race_against_someone_else() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut flow = GameFlow::Select { index: 2 };
            flow.advance(0.016, press_confirm(), &mut rng);
            let GameFlow::Racing(session) = &mut flow else {
                panic!("expected a race");
            };
            let karts = session.karts();
            assert_eq!(karts[0].racer.character, ROSTER[2]);
            assert_ne!(karts[1].racer.character, ROSTER[2]);
        }
    }

    #[test]
    fn results_time_out_back_to_select() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut flow = GameFlow::Results { winner: ROSTER[0], elapsed: 0.0 };
        flow.advance(5.0, FlowInput::default(), &mut rng);
        assert!(matches!(flow, GameFlow::Results { .. }));
        flow.advance(1.0, FlowInput::default(), &mut rng);
        assert!(matches!(flow, GameFlow::Select { index: 0 }));
    }

    #[test]
    fn results_skip_on_confirm() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut flow = GameFlow::Results { winner: ROSTER[3], elapsed: 0.0 };
        flow.advance(0.016, press_confirm(), &mut rng);
        assert!(matches!(flow, GameFlow::Select { .. }));
    }

    #[test]
    fn race_runs_until_someone_finishes() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut flow = GameFlow::default();
        flow.advance(0.016, press_confirm(), &mut rng);
        for _ in 0..10 {
            flow.advance(1.0 / 60.0, FlowInput::default(), &mut rng);
            assert!(matches!(flow, GameFlow::Racing(_)));
        }
    }
}
