pub mod components;
pub mod config;
pub mod cue;
pub mod error;
pub mod params;
pub mod player;
pub mod resources;
pub mod stage;
pub mod state;
pub mod systems;
pub mod table;

pub use components::*;
pub use config::*;
pub use cue::*;
pub use error::*;
pub use params::*;
pub use player::*;
pub use resources::*;
pub use stage::*;
pub use state::*;
pub use table::*;

use hecs::World;

/// Helper to spawn a ball entity at a fixed table index
pub fn create_ball(world: &mut World, label: &str, slot: u8, ball: Ball) -> hecs::Entity {
    world.spawn((ball, Label(label.to_string()), RackSlot(slot)))
}
