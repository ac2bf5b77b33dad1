pub mod collision;
pub mod contacts;
pub mod movement;
pub mod placement;
pub mod rules;

pub use collision::*;
pub use contacts::*;
pub use movement::*;
pub use placement::*;
pub use rules::*;
