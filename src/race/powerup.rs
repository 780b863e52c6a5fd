// Pickup zones scattered around the inner ring of the track.
//
// Each zone fires exactly once per race: the first kart (in grid order)
// whose box overlaps it takes the effect and the zone goes dark for good.

use bevy_ecs::prelude::*;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::config::RaceConfig;
use super::kart::Kart;

/// Side length of a pickup zone.
pub const POWERUP_SIZE: f32 = 26.0;
/// Side length of the box a kart collects pickups with.
pub const KART_PICKUP_SIZE: f32 = 36.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Boost,
    Slow,
}

/// Axis-aligned box stored as center + half size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half_size: Vec2,
}

impl Aabb {
    pub fn square(center: Vec2, size: f32) -> Self {
        Self {
            center,
            half_size: Vec2::splat(size / 2.0),
        }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half_size
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half_size
    }

    /// Strict overlap: boxes that only share an edge do not touch.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUp {
    pub zone: Aabb,
    pub effect: Effect,
    active: bool,
}

impl PowerUp {
    pub fn new(center: Vec2, effect: Effect) -> Self {
        Self {
            zone: Aabb::square(center, POWERUP_SIZE),
            effect,
            active: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// What happened when a zone was collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pickup {
    pub powerup: usize,
    pub effect: Effect,
    /// Index of the collecting kart in the slice passed to `handle_pickups`.
    pub picker: usize,
    /// Kart that was slowed alongside the picker, for `Slow` pickups.
    pub victim: Option<usize>,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct PowerUpField {
    powerups: Vec<PowerUp>,
}

impl PowerUpField {
    pub fn new(powerups: Vec<PowerUp>) -> Self {
        Self { powerups }
    }

    /// Drop `config.powerup_count` zones at independent random angles on
    /// the pickup ring, each a coin flip between boost and slow.
    pub fn spawn(config: &RaceConfig, rng: &mut impl Rng) -> Self {
        let center = config.track_center();
        let ring = config.powerup_ring_half_extents();
        let powerups = (0..config.powerup_count)
            .map(|_| {
                let angle = rng.gen_range(0.0..TAU);
                let pos = center + Vec2::new(angle.cos() * ring.x, angle.sin() * ring.y);
                let effect = if rng.gen_bool(0.5) { Effect::Boost } else { Effect::Slow };
                PowerUp::new(pos, effect)
            })
            .collect::<Vec<_>>();

        for p in &powerups {
            log::debug!("power-up {:?} at ({:.0}, {:.0})", p.effect, p.zone.center.x, p.zone.center.y);
        }

        Self::new(powerups)
    }

    pub fn powerups(&self) -> &[PowerUp] {
        &self.powerups
    }

    pub fn active(&self) -> impl Iterator<Item = &PowerUp> {
        self.powerups().iter().filter(|p| p.is_active())
    }

    /// Resolve overlaps between active zones and karts, in kart order.
    ///
    /// A slow pickup also slows the first kart in `karts` that is not the
    /// picker. Boost only touches the picker.
    pub fn handle_pickups(&mut self, karts: &mut [&mut Kart]) -> Vec<Pickup> {
        let mut events = Vec::new();
        for (index, powerup) in self.powerups.iter_mut().enumerate() {
            if !powerup.active {
                continue;
            }
            let picker = karts
                .iter()
                .position(|kart| Aabb::square(kart.position, KART_PICKUP_SIZE).overlaps(&powerup.zone));
            let Some(picker) = picker else {
                continue;
            };

            powerup.active = false;
            karts[picker].apply_effect(powerup.effect);

            let mut victim = None;
            if powerup.effect == Effect::Slow {
                victim = (0..karts.len()).find(|&i| i != picker);
                if let Some(other) = victim {
                    karts[other].apply_effect(Effect::Slow);
                }
            }

            events.push(Pickup {
                powerup: index,
                effect: powerup.effect,
                picker,
                victim,
            });
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::race::kart::{BOOST_DURATION, SLOW_DURATION};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn kart_at(x: f32, y: f32) -> Kart {
        Kart::new(Vec2::new(x, y), 0.0)
    }

    #[test]
    fn spawn_places_zones_on_the_ring() {
        let config = RaceConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let field = PowerUpField::spawn(&config, &mut rng);
        assert_eq!(field.powerups().len(), 5);

        let center = config.track_center();
        let ring = config.powerup_ring_half_extents();
        for p in field.powerups() {
            assert!(p.is_active());
            assert_eq!(p.zone.half_size, Vec2::splat(13.0));
            let rel = (p.zone.center - center) / ring;
            assert!((rel.length() - 1.0).abs() < 1e-3);
        }
    }

    #[test]
    fn spawn_draws_both_effects() {
        let config = RaceConfig {
            powerup_count: 200,
            ..RaceConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(42);
        let field = PowerUpField::spawn(&config, &mut rng);
        let boosts = field.powerups().iter().filter(|p| p.effect == Effect::Boost).count();
        assert!(boosts > 50 && boosts < 150, "boosts: {}", boosts);
    }

    #[test]
    fn overlap_is_strict() {
        let a = Aabb::square(Vec2::ZERO, 10.0);
        assert!(a.overlaps(&Aabb::square(Vec2::new(9.0, 9.0), 10.0)));
        assert!(!a.overlaps(&Aabb::square(Vec2::new(10.0, 0.0), 10.0)));
        assert!(!a.overlaps(&Aabb::square(Vec2::new(0.0, 30.0), 10.0)));
    }

    #[test]
    fn boost_only_affects_picker() {
        let mut field = PowerUpField::new(vec![PowerUp::new(Vec2::new(100.0, 100.0), Effect::Boost)]);
        let mut a = kart_at(500.0, 500.0);
        let mut b = kart_at(110.0, 95.0);

        let events = field.handle_pickups(&mut [&mut a, &mut b]);
        assert_eq!(
            events,
            vec![Pickup { powerup: 0, effect: Effect::Boost, picker: 1, victim: None }]
        );
        assert_eq!(b.boost_timer, BOOST_DURATION);
        assert_eq!(a.boost_timer, 0.0);
        assert_eq!(a.slow_timer, 0.0);
    }

    #[test]
    fn slow_also_hits_the_other_kart() {
        let mut field = PowerUpField::new(vec![PowerUp::new(Vec2::new(100.0, 100.0), Effect::Slow)]);
        // Index 0 is far away; index 1 collects.
        let mut far = kart_at(700.0, 300.0);
        let mut picker = kart_at(100.0, 100.0);

        let events = field.handle_pickups(&mut [&mut far, &mut picker]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].picker, 1);
        assert_eq!(events[0].victim, Some(0));
        assert_eq!(picker.slow_timer, SLOW_DURATION);
        assert_eq!(far.slow_timer, SLOW_DURATION);
    }

    #[test]
    fn first_overlapping_kart_in_order_wins() {
        let mut field = PowerUpField::new(vec![PowerUp::new(Vec2::new(100.0, 100.0), Effect::Slow)]);
        let mut first = kart_at(95.0, 100.0);
        let mut second = kart_at(105.0, 100.0);

        let events = field.handle_pickups(&mut [&mut first, &mut second]);
        assert_eq!(events[0].picker, 0);
        assert_eq!(events[0].victim, Some(1));
    }

    #[test]
    fn lone_kart_slow_pickup_has_no_victim() {
        let mut field = PowerUpField::new(vec![PowerUp::new(Vec2::new(100.0, 100.0), Effect::Slow)]);
        let mut solo = kart_at(100.0, 100.0);
        let events = field.handle_pickups(&mut [&mut solo]);
        assert_eq!(events[0].victim, None);
        assert_eq!(solo.slow_timer, SLOW_DURATION);
    }

    #[test]
    fn zones_fire_once() {
        let mut field = PowerUpField::new(vec![
            PowerUp::new(Vec2::new(100.0, 100.0), Effect::Boost),
            PowerUp::new(Vec2::new(400.0, 100.0), Effect::Slow),
        ]);
        let mut a = kart_at(100.0, 100.0);
        let mut b = kart_at(800.0, 100.0);

        assert_eq!(field.handle_pickups(&mut [&mut a, &mut b]).len(), 1);
        assert!(!field.powerups()[0].is_active());
        assert!(field.powerups()[1].is_active());

        a.boost_timer = 0.0;
        for _ in 0..5 {
            assert!(field.handle_pickups(&mut [&mut a, &mut b]).is_empty());
        }
        assert!(!field.powerups()[0].is_active());
        assert_eq!(a.boost_timer, 0.0);
        assert_eq!(field.active().count(), 1);
    }
}
