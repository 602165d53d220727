//! shprof - Shell Profiler
//!
//! Keeps shell aliases and functions in a local profile document and
//! synchronizes it with a named profile stored as a GitHub gist.
//!
//! # Components
//!
//! - [`store::LocalStore`]: the auth, profile and raw-cache JSON documents on disk
//! - [`remote::RemoteDirectory`]: list, fetch, create and update remote profiles
//! - [`engine::ProfileSession`]: select, load or create the active profile
//! - [`registry::ItemRegistry`]: alias and function CRUD on the active profile

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod registry;
pub mod remote;
pub mod store;
pub mod utils;

pub use engine::{push_profile, ActiveProfile, ProfileSession, SessionState};
pub use error::{ProfilerError, Result};
pub use model::{AuthRecord, Config, Item, ItemKind, ProfileDocument, RawProfileCache};
pub use registry::{DeleteReport, ItemDraft, ItemRegistry, UpsertOutcome};
pub use remote::{FetchedProfile, GistClient, MemoryDirectory, RemoteDirectory, RemoteProfileRef};
pub use store::{DocumentKind, LocalStore};
