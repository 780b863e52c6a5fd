// ECS systems for one race frame.
// Chained in this order: drive, progress, bounds, pickups, finish.

use bevy_ecs::prelude::*;

use super::components::*;
use crate::race::{ai_steer, CollisionBounds, Kart, PowerUpField, RaceConfig, TrackPath};

/// Feed controls into every kart and integrate one step.
/// AI karts steer from the progress they had at the end of last frame.
pub fn drive_system(
    frame: Res<FrameInput>,
    track: Res<TrackPath>,
    mut query: Query<(&Driver, &mut Kart)>,
) {
    for (driver, mut kart) in query.iter_mut() {
        let controls = match driver {
            Driver::Human => frame.human,
            Driver::Ai => ai_steer(&kart, &track),
        };
        kart.update(frame.dt, controls);
    }
}

/// Recompute track progress and count laps.
pub fn progress_system(track: Res<TrackPath>, mut query: Query<(&Racer, &mut Kart)>) {
    for (racer, mut kart) in query.iter_mut() {
        if kart.update_progress(&track) {
            log::info!("{} completed lap {}", racer.character.name, kart.lap);
        }
    }
}

/// Keep every kart inside the corridor.
pub fn bounds_system(bounds: Res<CollisionBounds>, mut query: Query<(&Racer, &mut Kart)>) {
    for (racer, mut kart) in query.iter_mut() {
        if let Some(contact) = bounds.clamp(&mut kart) {
            log::debug!("{} hit the {:?} wall", racer.character.name, contact);
        }
    }
}

/// Resolve power-up pickups with karts ordered by grid slot.
pub fn pickup_system(mut field: ResMut<PowerUpField>, mut query: Query<(&Racer, &mut Kart)>) {
    let mut ordered: Vec<_> = query.iter_mut().collect();
    ordered.sort_by_key(|(racer, _)| racer.slot);

    let names: Vec<_> = ordered.iter().map(|(racer, _)| racer.character.name).collect();
    let mut karts: Vec<&mut Kart> = ordered.iter_mut().map(|(_, kart)| &mut **kart).collect();

    for pickup in field.handle_pickups(&mut karts) {
        match pickup.victim {
            Some(victim) => log::debug!(
                "{} took {:?} #{}, {} is slowed too",
                names[pickup.picker],
                pickup.effect,
                pickup.powerup,
                names[victim]
            ),
            None => log::debug!(
                "{} took {:?} #{}",
                names[pickup.picker],
                pickup.effect,
                pickup.powerup
            ),
        }
    }
}

/// Declare the first kart (by slot) that has run the full distance.
pub fn finish_system(
    config: Res<RaceConfig>,
    mut outcome: ResMut<RaceOutcome>,
    query: Query<(&Racer, &Kart)>,
) {
    if outcome.winner.is_some() {
        return;
    }
    let winner = query
        .iter()
        .filter(|(_, kart)| kart.lap >= config.total_laps)
        .min_by_key(|(racer, _)| racer.slot);
    if let Some((racer, _)) = winner {
        log::info!("{} wins", racer.character.name);
        outcome.winner = Some(racer.character);
    }
}
