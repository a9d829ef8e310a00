//! Launcher configuration layer.
//!
//! All settings reads go through here so the rest of the launcher works with
//! typed structs instead of raw `std::env::var` calls.
//!
//! - `loader`: `SettingsSource` (process env first, then `pylaunch.env`)
//! - `schema`: `LayoutConfig`, `BehaviorConfig`, `ObservabilityConfig`
//! - `env_keys`: key constants

pub mod env_keys;
pub mod loader;
pub mod schema;

pub use loader::{parse_settings, SettingsSource, SETTINGS_FILE_NAME};
pub use schema::{BehaviorConfig, LayoutConfig, ObservabilityConfig};
