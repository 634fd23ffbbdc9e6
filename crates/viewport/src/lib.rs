pub mod controller;
pub mod fit;
pub mod interpolate;
pub mod transform;

pub use controller::*;
pub use fit::*;
pub use interpolate::*;
pub use transform::*;
