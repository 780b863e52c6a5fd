// Engine module - ECS plumbing, input, camera and drawing helpers
// The race simulation itself lives in `crate::race`

pub mod camera;
pub mod components;
pub mod hud;
pub mod input;
pub mod palette;
pub mod scene;
pub mod systems;
