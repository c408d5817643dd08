use std::path::PathBuf;

/// All domain errors for Nexoform.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum NexoformError {
    #[error(
        "Key '{key}' in chain '{chain}' produced no value.\n\n  \
         The expected key is missing from your nexoform.yml.\n  \
         Check the '{chain}' path in your config file, or regenerate a \
         commented template with defaults::default_yaml()."
    )]
    MissingKey { key: String, chain: String },

    #[error(
        "Parse error in {path}: {detail}\n\n  \
         The config file exists but is not valid YAML.\n  \
         Fix the syntax or regenerate the file from the default template."
    )]
    ParseError { path: PathBuf, detail: String },

    #[error(
        "Unexpected value type at '{chain}': expected {expected}, found {found}\n\n  \
         The key exists but its value has the wrong shape for this query."
    )]
    UnexpectedType {
        chain: String,
        expected: &'static str,
        found: String,
    },

    #[error("Failed to serialize settings: {detail}")]
    SerializeError { detail: String },

    #[error(
        "Failed to start shell for command '{command}': {reason}\n\n  \
         The shell itself could not be spawned. A command that starts and \
         then fails is not an error; it comes back as CommandResult data."
    )]
    CommandSpawn { command: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl NexoformError {
    /// True when this is a missing key in a lookup chain.
    ///
    /// The absence-means-disabled accessors branch on this; every other
    /// error kind still propagates through them.
    pub fn is_missing_key(&self) -> bool {
        matches!(self, NexoformError::MissingKey { .. })
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NexoformError>;
