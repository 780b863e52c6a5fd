// One race: an ECS world holding the karts and race resources, plus the
// schedule that advances it a frame at a time.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use rand::Rng;

use super::bounds::CollisionBounds;
use super::character::Character;
use super::config::RaceConfig;
use super::kart::{Controls, Kart};
use super::powerup::PowerUpField;
use super::track::TrackPath;
use crate::engine::components::{Driver, FrameInput, RaceOutcome, Racer};
use crate::engine::systems::*;

/// Read-only view of one kart for drawing and the HUD.
#[derive(Debug, Clone, Copy)]
pub struct KartView {
    pub racer: Racer,
    pub driver: Driver,
    pub kart: Kart,
}

pub struct RaceSession {
    world: World,
    schedule: Schedule,
}

impl RaceSession {
    /// Set up a race with the human in slot 0 and the AI in slot 1.
    pub fn new(config: RaceConfig, player: Character, rival: Character, rng: &mut impl Rng) -> Self {
        let mut world = World::new();

        world.insert_resource(TrackPath::from_config(&config));
        world.insert_resource(CollisionBounds::from_config(&config));
        world.insert_resource(PowerUpField::spawn(&config, rng));
        world.insert_resource(FrameInput::default());
        world.insert_resource(RaceOutcome::default());

        for (slot, (character, driver)) in [(player, Driver::Human), (rival, Driver::Ai)]
            .into_iter()
            .enumerate()
        {
            let (position, heading) = config.grid_slot(slot);
            world.spawn((Kart::new(position, heading), Racer { character, slot }, driver));
        }

        log::info!(
            "race start: {} vs {}, {} laps",
            player.name,
            rival.name,
            config.total_laps
        );
        world.insert_resource(config);

        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        schedule.add_systems(
            (
                drive_system,
                progress_system,
                bounds_system,
                pickup_system,
                finish_system,
            )
                .chain(),
        );

        Self { world, schedule }
    }

    /// Advance the race by `dt` seconds. Returns the winner once someone
    /// has finished; after that the race is frozen.
    pub fn step(&mut self, dt: f32, human: Controls) -> Option<Character> {
        if let Some(winner) = self.winner() {
            return Some(winner);
        }
        *self.world.resource_mut::<FrameInput>() = FrameInput { dt, human };
        self.schedule.run(&mut self.world);
        self.winner()
    }

    pub fn winner(&self) -> Option<Character> {
        self.world.resource::<RaceOutcome>().winner
    }

    pub fn config(&self) -> &RaceConfig {
        self.world.resource::<RaceConfig>()
    }

    pub fn powerups(&self) -> &PowerUpField {
        self.world.resource::<PowerUpField>()
    }

    /// All karts, ordered by grid slot.
    pub fn karts(&mut self) -> Vec<KartView> {
        let mut query = self.world.query::<(&Racer, &Driver, &Kart)>();
        let mut karts: Vec<_> = query
            .iter(&self.world)
            .map(|(racer, driver, kart)| KartView {
                racer: *racer,
                driver: *driver,
                kart: *kart,
            })
            .collect();
        karts.sort_by_key(|view| view.racer.slot);
        karts
    }

    #[cfg(test)]
    fn kart_mut(&mut self, slot: usize) -> Mut<'_, Kart> {
        let mut query = self.world.query::<(Entity, &Racer)>();
        let entity = query
            .iter(&self.world)
            .find(|(_, racer)| racer.slot == slot)
            .map(|(entity, _)| entity)
            .expect("no kart in that slot");
        self.world.get_mut::<Kart>(entity).expect("kart component")
    }
}
