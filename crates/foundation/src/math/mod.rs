pub mod precision;
pub mod projection;
pub mod spherical;

pub use precision::*;
pub use projection::*;
pub use spherical::*;
