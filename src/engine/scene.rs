// Turns race state into per-instance quad data for the GPU.
// One instance = one rotated rectangle or ellipse in arena space.

use glam::Vec2;

use super::palette::{self, Rgb};
use crate::race::session::KartView;
use crate::race::{Effect, PowerUpField, RaceConfig};

pub const SHAPE_RECT: u32 = 0;
pub const SHAPE_ELLIPSE: u32 = 1;

/// Start/finish style markers drawn around the outer edge.
const STRIPE_COUNT: usize = 16;
const STRIPE_SIZE: Vec2 = Vec2::new(20.0, 10.0);
const KART_BODY: Vec2 = Vec2::new(48.0, 28.0);
const KART_WHEEL: Vec2 = Vec2::new(12.0, 20.0);
/// Wheel block centers along the kart's long axis.
const WHEEL_OFFSET: f32 = 12.0;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub center: [f32; 2],
    pub half_size: [f32; 2],
    /// Radians, clockwise on screen.
    pub rotation: f32,
    pub shape: u32,
    pub color: [f32; 4],
}

impl InstanceData {
    pub fn rect(center: Vec2, size: Vec2, rotation: f32, color: Rgb) -> Self {
        Self {
            center: center.to_array(),
            half_size: (size / 2.0).to_array(),
            rotation,
            shape: SHAPE_RECT,
            color: palette::to_linear(color),
        }
    }

    pub fn ellipse(center: Vec2, half_extents: Vec2, color: Rgb) -> Self {
        Self {
            center: center.to_array(),
            half_size: half_extents.to_array(),
            rotation: 0.0,
            shape: SHAPE_ELLIPSE,
            color: palette::to_linear(color),
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
            1 => Float32x2,
            2 => Float32x2,
            3 => Float32,
            4 => Uint32,
            5 => Float32x4
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceData>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Track surface, infield and edge markers.
pub fn track_instances(config: &RaceConfig, out: &mut Vec<InstanceData>) {
    let center = config.track_center();
    let outer = config.outer_half_extents();
    out.push(InstanceData::ellipse(center, outer, palette::TRACK));
    out.push(InstanceData::ellipse(center, config.inner_half_extents(), palette::GRASS));

    for i in 0..STRIPE_COUNT {
        let angle = i as f32 / STRIPE_COUNT as f32 * std::f32::consts::TAU;
        let pos = center + Vec2::new(angle.cos() * outer.x, angle.sin() * outer.y);
        let color = if i % 2 == 0 { palette::WHITE } else { palette::YELLOW };
        out.push(InstanceData::rect(pos, STRIPE_SIZE, 0.0, color));
    }
}

pub fn powerup_instances(field: &PowerUpField, out: &mut Vec<InstanceData>) {
    for powerup in field.active() {
        let color = match powerup.effect {
            Effect::Boost => palette::BOOST,
            Effect::Slow => palette::SLOW,
        };
        out.push(InstanceData::rect(
            powerup.zone.center,
            powerup.zone.half_size * 2.0,
            0.0,
            color,
        ));
    }
}

/// Body plus two wheel blocks, all turned to the kart's heading.
pub fn kart_instances(view: &KartView, out: &mut Vec<InstanceData>) {
    let rotation = view.kart.heading.to_radians();
    let forward = Vec2::from_angle(rotation);
    let pos = view.kart.position;
    out.push(InstanceData::rect(pos, KART_BODY, rotation, view.racer.character.color));
    for side in [-1.0_f32, 1.0] {
        let wheel = pos + forward * WHEEL_OFFSET * side;
        out.push(InstanceData::rect(wheel, KART_WHEEL, rotation, palette::WHEEL));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::components::{Driver, Racer};
    use crate::race::{Kart, ROSTER};
    use crate::race::powerup::PowerUp;

    #[test]
    fn instance_layout_has_no_padding() {
        assert_eq!(std::mem::size_of::<InstanceData>(), 40);
    }

    #[test]
    fn track_draws_two_ellipses_and_stripes() {
        let mut out = Vec::new();
        track_instances(&RaceConfig::default(), &mut out);
        assert_eq!(out.len(), 2 + STRIPE_COUNT);
        assert_eq!(out[0].shape, SHAPE_ELLIPSE);
        assert_eq!(out[0].half_size, [400.0, 240.0]);
        assert_eq!(out[1].half_size, [320.0, 160.0]);
    }

    #[test]
    fn only_active_powerups_are_drawn() {
        let mut field = PowerUpField::new(vec![
            PowerUp::new(Vec2::new(10.0, 10.0), Effect::Boost),
            PowerUp::new(Vec2::new(300.0, 10.0), Effect::Slow),
        ]);
        let mut kart = Kart::new(Vec2::new(10.0, 10.0), 0.0);
        field.handle_pickups(&mut [&mut kart]);

        let mut out = Vec::new();
        powerup_instances(&field, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].center, [300.0, 10.0]);
        assert_eq!(out[0].half_size, [13.0, 13.0]);
    }

    #[test]
    fn wheels_follow_the_heading() {
        let view = KartView {
            racer: Racer { character: ROSTER[0], slot: 0 },
            driver: Driver::Human,
            kart: Kart::new(Vec2::new(100.0, 100.0), 90.0),
        };
        let mut out = Vec::new();
        kart_instances(&view, &mut out);
        assert_eq!(out.len(), 3);
        // Facing down the screen: wheels sit above and below the body center.
        assert!((out[1].center[0] - 100.0).abs() < 1e-3);
        assert!((out[1].center[1] - 88.0).abs() < 1e-3);
        assert!((out[2].center[1] - 112.0).abs() < 1e-3);
    }
}
