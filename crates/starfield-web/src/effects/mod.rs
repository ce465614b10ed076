//! Toggleable debug effects. Each controller is an owned object with
//! idempotent `enable`/`disable` transitions; `release` tears down anything
//! the controller still holds.

mod confetti;
mod gravity;
mod rain;
mod sound;
mod visual;

pub use confetti::ConfettiBurst;
pub use gravity::GravityMode;
pub use rain::RainShower;
pub use sound::TypeSound;
pub use visual::{ClassToggle, CursorOverride, OverlayToggle, Rainbow, Shake};
