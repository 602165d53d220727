//! Core data models for shprof

mod auth;
mod config;
mod profile;

pub use auth::AuthRecord;
pub use config::{Config, ProfileConfig, RemoteConfig};
pub use profile::{normalize_name, Item, ItemKind, ProfileDocument, RawProfileCache};
