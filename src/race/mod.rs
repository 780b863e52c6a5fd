// Race simulation: karts, the track they run on, walls, pickups and the
// computer driver. Nothing in here touches the window or the GPU.

pub mod ai;
pub mod bounds;
pub mod character;
pub mod config;
pub mod flow;
pub mod kart;
pub mod powerup;
pub mod session;
pub mod track;

pub use ai::ai_steer;
pub use bounds::CollisionBounds;
pub use character::{Character, ROSTER};
pub use config::RaceConfig;
pub use flow::{FlowInput, GameFlow};
pub use kart::{Controls, Kart};
pub use powerup::{Effect, PowerUpField};
pub use track::TrackPath;
