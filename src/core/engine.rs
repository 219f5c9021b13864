use crate::core::codec;
use crate::core::directory::{group_key, GroupDirectory, DEFAULT_NAMESPACE};
use crate::core::locks::KeyLocks;
use crate::domain::model::{Player, Roster};
use crate::domain::ports::{KeyValueBackend, RosterStore};
use crate::utils::error::{RosterError, Result};
use crate::utils::validation::{validate_group_name, Validate};
use async_trait::async_trait;

/// Roster storage engine: one backend key per group, rosters stored whole.
///
/// Mutations on the same group are serialized through [`KeyLocks`], so two
/// concurrent adds to one group both land. Reads take no lock.
pub struct RosterEngine<B: KeyValueBackend> {
    backend: B,
    namespace: String,
    locks: KeyLocks,
}

impl<B: KeyValueBackend> RosterEngine<B> {
    pub fn new(backend: B) -> Self {
        Self::with_namespace(backend, DEFAULT_NAMESPACE)
    }

    pub fn with_namespace(backend: B, namespace: impl Into<String>) -> Self {
        Self {
            backend,
            namespace: namespace.into(),
            locks: KeyLocks::new(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn directory(&self) -> GroupDirectory<'_, B> {
        GroupDirectory::new(&self.backend, &self.namespace)
    }

    async fn load(&self, key: &str) -> Result<Option<Roster>> {
        let bytes = self
            .backend
            .read(key)
            .await
            .map_err(|e| RosterError::storage(key, e))?;

        bytes
            .map(|bytes| {
                codec::decode(&bytes).map_err(|source| RosterError::Decode {
                    key: key.to_string(),
                    source,
                })
            })
            .transpose()
    }

    async fn store(&self, key: &str, roster: &Roster) -> Result<()> {
        let bytes = codec::encode(roster)?;
        self.backend
            .write(key, &bytes)
            .await
            .map_err(|e| RosterError::storage(key, e))
    }
}

#[async_trait]
impl<B: KeyValueBackend> RosterStore for RosterEngine<B> {
    async fn add_player_to_group(&self, player: Player, group: &str) -> Result<()> {
        player.validate()?;
        validate_group_name(group)?;

        let key = group_key(&self.namespace, group);
        let _guard = self.locks.acquire(&key).await;

        let existing = self.load(&key).await?;
        if existing.is_none() {
            tracing::debug!("Creating group '{}' on first player", group);
        }

        let mut roster = existing.unwrap_or_default();
        if let Err(rejected) = roster.push(player) {
            return Err(RosterError::DuplicatePlayer {
                group: group.to_string(),
                player: rejected.name,
            });
        }

        self.store(&key, &roster).await?;
        tracing::debug!("Group '{}' now has {} players", group, roster.len());
        Ok(())
    }

    async fn list_players_by_group_and_team(&self, group: &str, team: &str) -> Result<Vec<Player>> {
        let key = group_key(&self.namespace, group);
        Ok(self
            .load(&key)
            .await?
            .map(|roster| roster.by_team(team))
            .unwrap_or_default())
    }

    async fn remove_player_from_group(&self, player_name: &str, group: &str) -> Result<()> {
        let key = group_key(&self.namespace, group);
        let _guard = self.locks.acquire(&key).await;

        // Removing from an unknown group must not create it.
        let Some(mut roster) = self.load(&key).await? else {
            tracing::trace!("Group '{}' does not exist, nothing to remove", group);
            return Ok(());
        };

        if roster.remove(player_name).is_none() {
            tracing::trace!("Player '{}' not in group '{}'", player_name, group);
            return Ok(());
        }

        self.store(&key, &roster).await?;
        tracing::debug!("Removed '{}' from group '{}'", player_name, group);
        Ok(())
    }

    async fn remove_group(&self, group: &str) -> Result<()> {
        let key = group_key(&self.namespace, group);
        let _guard = self.locks.acquire(&key).await;

        self.backend
            .delete(&key)
            .await
            .map_err(|e| RosterError::storage(&key, e))?;
        tracing::debug!("Removed group '{}'", group);
        Ok(())
    }

    async fn list_players_by_group(&self, group: &str) -> Result<Vec<Player>> {
        let key = group_key(&self.namespace, group);
        Ok(self
            .load(&key)
            .await?
            .map(Roster::into_players)
            .unwrap_or_default())
    }

    async fn list_groups(&self) -> Result<Vec<String>> {
        self.directory().list().await
    }

    async fn group_exists(&self, group: &str) -> Result<bool> {
        self.directory().contains(group).await
    }

    async fn create_group(&self, group: &str) -> Result<()> {
        validate_group_name(group)?;

        let key = group_key(&self.namespace, group);
        let _guard = self.locks.acquire(&key).await;

        if self.directory().contains(group).await? {
            return Err(RosterError::DuplicateGroup {
                group: group.to_string(),
            });
        }

        self.store(&key, &Roster::new()).await?;
        tracing::debug!("Created empty group '{}'", group);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryBackend;

    #[tokio::test]
    async fn test_add_persists_envelope_under_namespaced_key() {
        let engine = RosterEngine::with_namespace(MemoryBackend::new(), "teams");
        engine
            .add_player_to_group(Player::new("Ana", "Time A"), "Turma1")
            .await
            .unwrap();

        let raw = engine.backend().read("teams:Turma1").await.unwrap().unwrap();
        let doc = codec::decode_document(&raw).unwrap();
        assert_eq!(doc.version, codec::SCHEMA_VERSION);
        assert_eq!(doc.roster.players(), &[Player::new("Ana", "Time A")]);
    }

    #[tokio::test]
    async fn test_remove_missing_player_does_not_rewrite() {
        let engine = RosterEngine::new(MemoryBackend::new());
        engine
            .add_player_to_group(Player::new("Ana", "Time A"), "Turma1")
            .await
            .unwrap();
        let key = group_key(engine.namespace(), "Turma1");
        let before = engine.backend().read(&key).await.unwrap();

        engine.remove_player_from_group("Bia", "Turma1").await.unwrap();

        // updated_at would differ had the roster been written again
        assert_eq!(engine.backend().read(&key).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_writes_reject_empty_names_before_io() {
        let engine = RosterEngine::new(MemoryBackend::new());

        let err = engine
            .add_player_to_group(Player::new("", "Time A"), "Turma1")
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::InvalidPlayer { .. }));

        let err = engine
            .add_player_to_group(Player::new("Ana", "Time A"), "")
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::InvalidGroupName { .. }));

        let err = engine.create_group("").await.unwrap_err();
        assert!(matches!(err, RosterError::InvalidGroupName { .. }));

        assert!(engine.backend().is_empty().await);
    }

    #[tokio::test]
    async fn test_empty_group_name_is_an_absent_key_for_reads_and_removals() {
        let engine = RosterEngine::new(MemoryBackend::new());

        assert!(engine
            .list_players_by_group_and_team("", "Time A")
            .await
            .unwrap()
            .is_empty());
        assert!(engine.list_players_by_group("").await.unwrap().is_empty());
        assert!(!engine.group_exists("").await.unwrap());
        engine.remove_player_from_group("Ana", "").await.unwrap();
        engine.remove_group("").await.unwrap();
        engine.remove_group("  ").await.unwrap();

        assert!(engine.backend().is_empty().await);
    }

    #[tokio::test]
    async fn test_whitespace_names_are_ordinary_names() {
        let engine = RosterEngine::new(MemoryBackend::new());
        engine
            .add_player_to_group(Player::new(" ", "Time A"), "  ")
            .await
            .unwrap();

        assert_eq!(
            engine.list_players_by_group_and_team("  ", "Time A").await.unwrap(),
            vec![Player::new(" ", "Time A")]
        );
        assert!(engine.list_players_by_group("").await.unwrap().is_empty());
    }
}
