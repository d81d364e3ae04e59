pub mod global;
pub mod model;

pub use global::CONFIG;
pub use model::{IndexConfig, LoggingConfig, Settings, load_settings};
