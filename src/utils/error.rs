use thiserror::Error;

/// Coarse classification a host can branch on without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DuplicatePlayer,
    DuplicateGroup,
    StorageIoFailure,
    DecodeFailure,
    EncodeFailure,
    InvalidInput,
    Configuration,
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("malformed roster document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unsupported roster schema version {found} (supported up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("player '{name}' appears more than once")]
    DuplicatePlayer { name: String },
}

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Player '{player}' already exists in group '{group}'")]
    DuplicatePlayer { group: String, player: String },

    #[error("Group '{group}' already exists")]
    DuplicateGroup { group: String },

    #[error("Storage I/O failure on key '{key}': {source}")]
    StorageIo {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Stored roster under '{key}' could not be decoded: {source}")]
    Decode {
        key: String,
        #[source]
        source: DecodeError,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid player: {message}")]
    InvalidPlayer { message: String },

    #[error("Invalid group name: {message}")]
    InvalidGroupName { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl RosterError {
    pub(crate) fn storage(key: &str, source: std::io::Error) -> Self {
        RosterError::StorageIo {
            key: key.to_string(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RosterError::DuplicatePlayer { .. } => ErrorKind::DuplicatePlayer,
            RosterError::DuplicateGroup { .. } => ErrorKind::DuplicateGroup,
            RosterError::StorageIo { .. } => ErrorKind::StorageIoFailure,
            RosterError::Decode { .. } => ErrorKind::DecodeFailure,
            RosterError::SerializationError(_) => ErrorKind::EncodeFailure,
            RosterError::InvalidPlayer { .. } | RosterError::InvalidGroupName { .. } => {
                ErrorKind::InvalidInput
            }
            RosterError::ConfigError { .. }
            | RosterError::InvalidConfigValueError { .. }
            | RosterError::MissingConfigError { .. } => ErrorKind::Configuration,
        }
    }

    /// Whether the caller can fix the problem by changing its input.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::DuplicatePlayer | ErrorKind::DuplicateGroup | ErrorKind::InvalidInput
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RosterError::DuplicatePlayer { group, player } => {
                format!("'{}' is already on the roster of '{}'", player, group)
            }
            RosterError::DuplicateGroup { group } => {
                format!("A group named '{}' already exists", group)
            }
            RosterError::StorageIo { .. } => "The roster storage could not be accessed".to_string(),
            RosterError::Decode { .. } => "The stored roster data is damaged".to_string(),
            RosterError::SerializationError(_) => "The roster could not be saved".to_string(),
            RosterError::InvalidPlayer { message } | RosterError::InvalidGroupName { message } => {
                message.clone()
            }
            RosterError::ConfigError { .. }
            | RosterError::InvalidConfigValueError { .. }
            | RosterError::MissingConfigError { .. } => format!("Invalid configuration: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.kind() {
            ErrorKind::DuplicatePlayer => "Pick a different player name or remove the existing player first",
            ErrorKind::DuplicateGroup => "Pick a different group name",
            ErrorKind::StorageIoFailure => "Check that the storage backend is reachable and writable, then retry",
            ErrorKind::DecodeFailure => "Inspect or remove the damaged group entry in the backend",
            ErrorKind::EncodeFailure => "Retry the operation",
            ErrorKind::InvalidInput => "Provide a non-empty name",
            ErrorKind::Configuration => "Review the configuration file and command line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
