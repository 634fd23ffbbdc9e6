pub mod easing;
pub mod event_bus;
pub mod tween;

pub use easing::*;
pub use event_bus::*;
pub use tween::*;
