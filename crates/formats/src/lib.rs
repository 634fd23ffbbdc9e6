pub mod bootstrap;
pub mod content;
pub mod geojson;
pub mod json;
pub mod site;

pub use bootstrap::*;
pub use content::*;
pub use geojson::*;
pub use site::*;
