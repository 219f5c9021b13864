pub mod codec;
pub mod directory;
pub mod engine;
pub mod locks;

pub use crate::domain::model::{Player, Roster};
pub use crate::domain::ports::{KeyValueBackend, RosterStore, StoreSettings};
pub use crate::utils::error::Result;
