pub mod audio_constants;
pub mod config;
pub mod types;

pub use audio_constants::*;
pub use config::LpcConfig;
pub use types::*;
