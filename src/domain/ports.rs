use crate::domain::model::{BackendKind, Player, S3Settings};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::future::Future;
use std::io;
use std::sync::Arc;

/// Async key-value medium. Every write is a full overwrite of the key.
pub trait KeyValueBackend: Send + Sync {
    /// `None` when the key was never written (or has been deleted).
    fn read(&self, key: &str) -> impl Future<Output = io::Result<Option<Vec<u8>>>> + Send;

    fn write(&self, key: &str, value: &[u8]) -> impl Future<Output = io::Result<()>> + Send;

    /// Deleting an absent key succeeds.
    fn delete(&self, key: &str) -> impl Future<Output = io::Result<()>> + Send;

    fn list_keys(&self, prefix: &str) -> impl Future<Output = io::Result<BTreeSet<String>>> + Send;
}

impl<B: KeyValueBackend> KeyValueBackend for Arc<B> {
    async fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        (**self).read(key).await
    }

    async fn write(&self, key: &str, value: &[u8]) -> io::Result<()> {
        (**self).write(key, value).await
    }

    async fn delete(&self, key: &str) -> io::Result<()> {
        (**self).delete(key).await
    }

    async fn list_keys(&self, prefix: &str) -> io::Result<BTreeSet<String>> {
        (**self).list_keys(prefix).await
    }
}

pub trait StoreSettings: Send + Sync {
    fn backend(&self) -> BackendKind;
    fn namespace(&self) -> &str;
    fn data_dir(&self) -> &str;
    fn s3(&self) -> Option<&S3Settings>;
}

/// Group-scoped roster operations offered to the host application.
#[async_trait]
pub trait RosterStore: Send + Sync {
    async fn add_player_to_group(&self, player: Player, group: &str) -> Result<()>;
    async fn list_players_by_group_and_team(&self, group: &str, team: &str) -> Result<Vec<Player>>;
    async fn remove_player_from_group(&self, player_name: &str, group: &str) -> Result<()>;
    async fn remove_group(&self, group: &str) -> Result<()>;

    async fn list_players_by_group(&self, group: &str) -> Result<Vec<Player>>;
    async fn list_groups(&self) -> Result<Vec<String>>;
    async fn group_exists(&self, group: &str) -> Result<bool>;
    async fn create_group(&self, group: &str) -> Result<()>;
}
