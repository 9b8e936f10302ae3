pub mod color;
pub mod config;
pub mod presets;

pub use color::{HexColor, ParseColorError};
pub use config::AppConfig;
pub use presets::{default_presets, TierPreset};
