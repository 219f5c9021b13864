//! JSON encoding of a group's roster.
//!
//! Rosters are written as a versioned envelope:
//!
//! ```json
//! {"version": 1, "updated_at": "2026-01-01T00:00:00Z", "players": [{"name": "Ana", "team": "Time A"}]}
//! ```
//!
//! A bare array of players (the layout used before the envelope existed) is
//! still accepted on read and reported as version 0.

use crate::domain::model::{Player, Roster};
use crate::utils::error::DecodeError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;
pub const LEGACY_VERSION: u32 = 0;

#[derive(Serialize)]
struct Envelope<'a> {
    version: u32,
    updated_at: DateTime<Utc>,
    players: &'a [Player],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Stored {
    Versioned {
        version: u32,
        #[serde(default)]
        updated_at: Option<DateTime<Utc>>,
        players: Vec<Player>,
    },
    Legacy(Vec<Player>),
}

/// A decoded roster along with its envelope metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterDocument {
    pub version: u32,
    pub updated_at: Option<DateTime<Utc>>,
    pub roster: Roster,
}

pub fn encode(roster: &Roster) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&Envelope {
        version: SCHEMA_VERSION,
        updated_at: Utc::now(),
        players: roster.players(),
    })
}

pub fn decode(bytes: &[u8]) -> Result<Roster, DecodeError> {
    decode_document(bytes).map(|doc| doc.roster)
}

/// Decodes a stored roster. A roster naming the same player twice is rejected
/// as corrupt.
pub fn decode_document(bytes: &[u8]) -> Result<RosterDocument, DecodeError> {
    let (version, updated_at, players) = match serde_json::from_slice::<Stored>(bytes)? {
        Stored::Versioned {
            version,
            updated_at,
            players,
        } => {
            if version > SCHEMA_VERSION {
                return Err(DecodeError::UnsupportedVersion {
                    found: version,
                    supported: SCHEMA_VERSION,
                });
            }
            (version, updated_at, players)
        }
        Stored::Legacy(players) => (LEGACY_VERSION, None, players),
    };

    let roster = Roster::try_from_players(players)
        .map_err(|repeated| DecodeError::DuplicatePlayer { name: repeated.name })?;

    Ok(RosterDocument {
        version,
        updated_at,
        roster,
    })
}
