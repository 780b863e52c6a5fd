// Input state tracking for the keyboard
// Abstracts winit events into a queryable per-frame snapshot

use std::collections::HashSet;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::race::{Controls, FlowInput};

#[derive(Default)]
pub struct InputState {
    keys_held: HashSet<KeyCode>,
    // Keys that went down this frame, reset in end_frame()
    keys_pressed: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a winit WindowEvent into the input state.
    /// Call this once per event before the game's own event handling.
    pub fn process_event(&mut self, event: &WindowEvent) {
        if let WindowEvent::KeyboardInput { event, .. } = event {
            if let PhysicalKey::Code(key) = event.physical_key {
                match event.state {
                    ElementState::Pressed => self.press(key, event.repeat),
                    ElementState::Released => self.release(key),
                }
            }
        }
    }

    fn press(&mut self, key: KeyCode, repeat: bool) {
        if self.keys_held.insert(key) && !repeat {
            self.keys_pressed.insert(key);
        }
    }

    fn release(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
    }

    /// Call once per frame after the game has consumed input.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    pub fn was_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| self.is_key_held(*k))
    }

    fn any_pressed(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| self.was_key_pressed(*k))
    }

    /// Arrow keys or WASD. Opposite directions cancel out.
    pub fn driving_controls(&self) -> Controls {
        let axis = |negative: &[KeyCode], positive: &[KeyCode]| {
            let mut value = 0.0;
            if self.any_held(positive) {
                value += 1.0;
            }
            if self.any_held(negative) {
                value -= 1.0;
            }
            value
        };
        Controls::new(
            axis(&[KeyCode::ArrowLeft, KeyCode::KeyA], &[KeyCode::ArrowRight, KeyCode::KeyD]),
            axis(&[KeyCode::ArrowDown, KeyCode::KeyS], &[KeyCode::ArrowUp, KeyCode::KeyW]),
        )
    }

    pub fn flow_input(&self) -> FlowInput {
        FlowInput {
            previous: self.any_pressed(&[KeyCode::ArrowLeft, KeyCode::KeyA]),
            next: self.any_pressed(&[KeyCode::ArrowRight, KeyCode::KeyD]),
            confirm: self.any_pressed(&[KeyCode::Enter, KeyCode::NumpadEnter, KeyCode::Space]),
            drive: self.driving_controls(),
        }
    }
}
