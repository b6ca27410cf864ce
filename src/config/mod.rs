//! Configuration module — project settings from `.credkeep.toml`.

pub mod settings;

pub use settings::Settings;
