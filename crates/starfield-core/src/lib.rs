pub mod constants;
pub mod engine;
pub mod entity;
pub mod fx;
pub mod parallax;
pub mod trail;

pub use constants::*;
pub use engine::*;
pub use entity::*;
pub use fx::*;
pub use parallax::*;
pub use trail::*;
