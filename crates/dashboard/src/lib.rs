pub mod catalog;
pub mod controller;
pub mod event;
pub mod render;
pub mod selection;
pub mod state;
pub mod transition;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::*;
pub use controller::*;
pub use event::*;
pub use render::*;
pub use selection::*;
pub use state::*;
pub use transition::*;
