use crate::domain::ports::KeyValueBackend;
use crate::utils::error::{RosterError, Result};

pub const DEFAULT_NAMESPACE: &str = "roster.players";
const SEPARATOR: char = ':';

/// Backend key holding the roster of `group`.
pub fn group_key(namespace: &str, group: &str) -> String {
    format!("{}{}{}", namespace, SEPARATOR, group)
}

pub fn key_prefix(namespace: &str) -> String {
    format!("{}{}", namespace, SEPARATOR)
}

/// Inverse of [`group_key`]; `None` for keys outside the namespace.
pub fn group_name<'a>(namespace: &str, key: &'a str) -> Option<&'a str> {
    key.strip_prefix(namespace)?.strip_prefix(SEPARATOR)
}

/// The set of groups present in one namespace of a backend.
pub struct GroupDirectory<'a, B: KeyValueBackend> {
    backend: &'a B,
    namespace: &'a str,
}

impl<'a, B: KeyValueBackend> GroupDirectory<'a, B> {
    pub fn new(backend: &'a B, namespace: &'a str) -> Self {
        Self { backend, namespace }
    }

    /// Group names, sorted.
    pub async fn list(&self) -> Result<Vec<String>> {
        let prefix = key_prefix(self.namespace);
        let keys = self
            .backend
            .list_keys(&prefix)
            .await
            .map_err(|e| RosterError::storage(&prefix, e))?;

        Ok(keys
            .iter()
            .filter_map(|key| group_name(self.namespace, key))
            .map(str::to_string)
            .collect())
    }

    pub async fn contains(&self, group: &str) -> Result<bool> {
        let key = group_key(self.namespace, group);
        self.backend
            .read(&key)
            .await
            .map(|value| value.is_some())
            .map_err(|e| RosterError::storage(&key, e))
    }
}
