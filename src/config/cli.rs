use crate::config::toml_config::TomlConfig;
use crate::domain::model::BackendKind;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "roster")]
#[command(about = "Manage group rosters of players split into teams")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Storage backend (overrides the configuration file)
    #[arg(long, value_enum, global = true)]
    pub backend: Option<BackendKind>,

    /// Directory used by the local backend
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Key namespace reserved for rosters
    #[arg(long, global = true)]
    pub namespace: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Add a player to a group, creating the group if needed
    Add {
        group: String,
        player: String,
        #[arg(short, long, default_value = "Time A")]
        team: String,
    },
    /// List the players of a group, optionally only one team
    List {
        group: String,
        #[arg(short, long)]
        team: Option<String>,
    },
    /// Remove a player from a group
    Remove { group: String, player: String },
    /// Create an empty group
    CreateGroup { group: String },
    /// Remove a group and all of its players
    RemoveGroup { group: String },
    /// List all groups
    Groups,
}

impl CliConfig {
    /// Configuration file (or defaults) with command line overrides applied.
    pub fn settings(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(backend) = self.backend {
            config.store.backend = backend;
        }
        if let Some(data_dir) = &self.data_dir {
            config.store.data_dir = data_dir.clone();
        }
        if let Some(namespace) = &self.namespace {
            config.store.namespace = namespace.clone();
        }

        Ok(config)
    }
}
