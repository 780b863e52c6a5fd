// egui overlay: character select, in-race HUD and the results banner.
// Painted on top of the wgpu scene in its own render pass.

use glam::Vec2;

use super::palette::{self, Rgb};
use crate::race::Character;
use crate::race::session::KartView;

/// What the overlay should show this frame.
pub enum HudScene {
    Select {
        roster: &'static [Character],
        index: usize,
    },
    Racing {
        player: KartView,
        rival: KartView,
        total_laps: u32,
    },
    Results {
        winner: Character,
    },
}

pub struct Hud {
    /// Arena size in world units; the overlay scales it onto the window.
    arena: Vec2,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Hud {
    pub fn new(
        window: &winit::window::Window,
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        arena: Vec2,
    ) -> Self {
        let egui_ctx = egui::Context::default();
        egui_ctx.set_visuals(egui::Visuals::dark());

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface_format,
            None,  // no depth
            1,     // msaa samples
            false, // no dithering
        );

        Self {
            arena,
            egui_ctx,
            egui_state,
            egui_renderer,
        }
    }

    pub fn handle_window_event(
        &mut self,
        window: &winit::window::Window,
        event: &winit::event::WindowEvent,
    ) -> egui_winit::EventResponse {
        self.egui_state.on_window_event(window, event)
    }

    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        window: &winit::window::Window,
        view: &wgpu::TextureView,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
        scene: &HudScene,
    ) {
        let raw_input = self.egui_state.take_egui_input(window);
        let arena = self.arena;

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            let painter = ctx.layer_painter(egui::LayerId::new(
                egui::Order::Foreground,
                egui::Id::new("race_hud"),
            ));
            let canvas = Canvas::new(&painter, ctx.screen_rect(), arena);
            match scene {
                HudScene::Select { roster, index } => canvas.select(roster, *index),
                HudScene::Racing { player, rival, total_laps } => {
                    canvas.race(player, rival, *total_laps)
                }
                HudScene::Results { winner } => canvas.results(winner),
            }
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, &tris, screen_descriptor);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("HUD Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.egui_renderer
                .render(&mut render_pass.forget_lifetime(), &tris, screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

/// Painter wrapper that takes arena coordinates.
struct Canvas<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
    scale: f32,
    arena: Vec2,
}

impl<'a> Canvas<'a> {
    fn new(painter: &'a egui::Painter, screen: egui::Rect, arena: Vec2) -> Self {
        let scale = (screen.width() / arena.x).min(screen.height() / arena.y);
        Self {
            painter,
            origin: screen.min,
            scale,
            arena,
        }
    }

    fn pos(&self, x: f32, y: f32) -> egui::Pos2 {
        self.origin + egui::vec2(x, y) * self.scale
    }

    fn text(&self, x: f32, y: f32, anchor: egui::Align2, text: &str, size: f32, color: Rgb) {
        self.painter.text(
            self.pos(x, y),
            anchor,
            text,
            egui::FontId::proportional(size * self.scale),
            palette::to_egui(color),
        );
    }

    fn fill(&self, color: Rgb) {
        self.painter.rect_filled(
            egui::Rect::from_min_max(self.pos(0.0, 0.0), self.pos(self.arena.x, self.arena.y)),
            0.0,
            palette::to_egui(color),
        );
    }

    fn select(&self, roster: &[Character], index: usize) {
        let (w, h) = (self.arena.x, self.arena.y);
        self.fill(palette::BACKGROUND);
        self.text(w / 2.0, 120.0, egui::Align2::CENTER_CENTER, "Select your racer", 40.0, palette::WHITE);

        for (i, character) in roster.iter().enumerate() {
            let cx = w / 2.0 + (i as f32 - index as f32) * 180.0;
            let card = egui::Rect::from_center_size(
                self.pos(cx, h / 2.0),
                egui::vec2(120.0, 120.0) * self.scale,
            );
            self.painter
                .rect_filled(card, 20.0 * self.scale, palette::to_egui(character.color));
            if i == index {
                self.painter.rect_stroke(
                    card.expand(6.0 * self.scale),
                    24.0 * self.scale,
                    egui::Stroke::new(3.0 * self.scale, palette::to_egui(palette::WHITE)),
                );
            }
            self.text(cx, h / 2.0 + 90.0, egui::Align2::CENTER_CENTER, character.name, 26.0, palette::WHITE);
        }

        self.text(w / 2.0, h - 80.0, egui::Align2::CENTER_CENTER, "Press Enter to race", 26.0, palette::WHITE);
    }

    fn race(&self, player: &KartView, rival: &KartView, total_laps: u32) {
        let shown_lap = |kart: &KartView| (kart.kart.lap + 1).min(total_laps);
        let line = format!(
            "Lap {}/{}  |  Speed: {:3}  |  Rival Lap: {}/{}",
            shown_lap(player),
            total_laps,
            player.kart.speed as i32,
            shown_lap(rival),
            total_laps
        );
        self.text(20.0, 20.0, egui::Align2::LEFT_TOP, &line, 22.0, palette::WHITE);

        if player.kart.boost_timer > 0.0 {
            let boost = format!("Boost: {:.1}s", player.kart.boost_timer);
            self.text(20.0, 50.0, egui::Align2::LEFT_TOP, &boost, 22.0, palette::BOOST);
        }
        if player.kart.slow_timer > 0.0 {
            let slow = format!("Slowed: {:.1}s", player.kart.slow_timer);
            self.text(20.0, 80.0, egui::Align2::LEFT_TOP, &slow, 22.0, palette::SLOW);
        }
    }

    fn results(&self, winner: &Character) {
        let (w, h) = (self.arena.x, self.arena.y);
        self.fill(palette::BACKGROUND);
        let message = format!("{} wins!", winner.name);
        self.text(w / 2.0, h / 2.0 - 40.0, egui::Align2::CENTER_CENTER, &message, 52.0, palette::WHITE);
        self.text(
            w / 2.0,
            h / 2.0 + 40.0,
            egui::Align2::CENTER_CENTER,
            "Press Enter to play again or Esc to quit",
            26.0,
            palette::WHITE,
        );
    }
}
