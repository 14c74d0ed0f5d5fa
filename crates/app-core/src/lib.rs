pub mod constants;
pub mod counter;
pub mod cursor;
pub mod links;
pub mod particles;
pub mod scene;
pub mod site;
pub mod state;

pub use constants::*;
pub use counter::*;
pub use cursor::*;
pub use links::*;
pub use particles::*;
pub use scene::*;
pub use state::*;
