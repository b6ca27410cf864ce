use thiserror::Error;

/// All errors that can occur in credkeep.
#[derive(Debug, Error)]
pub enum CredKeepError {
    // --- Vault errors ---
    #[error("Vault authentication failed — wrong password or corrupted vault")]
    AuthFailed,

    #[error("Invalid vault format: {0}")]
    InvalidVaultFormat(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    // --- Store errors ---
    #[error("Secret '{0}' not found")]
    SecretNotFound(String),

    #[error("A secret named '{0}' already exists")]
    NameCollision(String),

    #[error("Secret '{0}' cannot have an empty value")]
    InvalidValue(String),

    #[error("Invalid secret name: {0}")]
    InvalidName(String),

    // --- Keyring errors ---
    #[error("Keyring error: {0}")]
    KeyringError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI / runner errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Report script exited with code {0}")]
    ScriptFailed(i32),
}

/// Convenience type alias for credkeep results.
pub type Result<T> = std::result::Result<T, CredKeepError>;
