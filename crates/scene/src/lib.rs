pub mod feature_index;
pub mod picking;
pub mod projector;

pub use feature_index::*;
pub use picking::*;
pub use projector::*;
