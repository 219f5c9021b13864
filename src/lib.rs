pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{local::LocalBackend, memory::MemoryBackend, open_store};

#[cfg(feature = "s3")]
pub use adapters::s3::S3Backend;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::TomlConfig;
pub use self::core::engine::RosterEngine;
pub use domain::model::{BackendKind, Player, Roster, S3Settings};
pub use domain::ports::{KeyValueBackend, RosterStore, StoreSettings};
pub use utils::error::{ErrorKind, Result, RosterError};
