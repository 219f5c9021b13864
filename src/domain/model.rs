use crate::utils::error::{RosterError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub team: String,
}

impl Player {
    pub fn new(name: impl Into<String>, team: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            team: team.into(),
        }
    }
}

impl Validate for Player {
    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(RosterError::InvalidPlayer {
                message: "Player name cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Players of one group, in insertion order, with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps players exactly as given; uniqueness is not re-checked.
    pub fn from_players(players: Vec<Player>) -> Self {
        Self { players }
    }

    /// Builds a roster in order, handing back the first player whose name
    /// repeats an earlier one.
    pub fn try_from_players(players: Vec<Player>) -> std::result::Result<Self, Player> {
        let mut roster = Self::new();
        for player in players {
            roster.push(player)?;
        }
        Ok(roster)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn into_players(self) -> Vec<Player> {
        self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.players.iter().any(|p| p.name == name)
    }

    /// Appends `player`, handing it back when the name is already taken.
    pub fn push(&mut self, player: Player) -> std::result::Result<(), Player> {
        if self.contains(&player.name) {
            return Err(player);
        }
        self.players.push(player);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<Player> {
        let index = self.players.iter().position(|p| p.name == name)?;
        Some(self.players.remove(index))
    }

    pub fn by_team(&self, team: &str) -> Vec<Player> {
        self.players
            .iter()
            .filter(|p| p.team == team)
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Memory,
    #[default]
    Local,
    S3,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BackendKind::Memory => "memory",
            BackendKind::Local => "local",
            BackendKind::S3 => "s3",
        };
        f.write_str(name)
    }
}

impl FromStr for BackendKind {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(BackendKind::Memory),
            "local" => Ok(BackendKind::Local),
            "s3" => Ok(BackendKind::S3),
            other => Err(RosterError::InvalidConfigValueError {
                field: "store.backend".to_string(),
                value: other.to_string(),
                reason: "Valid backends: memory, local, s3".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Settings {
    pub bucket: String,
    #[serde(default)]
    pub prefix: String,
    pub region: String,
    /// Custom endpoint for S3-compatible stores such as MinIO.
    pub endpoint: Option<String>,
}
