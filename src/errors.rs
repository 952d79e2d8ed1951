use thiserror::Error;

/// All errors that can occur in Glossa.
#[derive(Debug, Error)]
pub enum GlossaError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — corrupted data or wrong key")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Store errors ---
    #[error("Invalid store format: {0}")]
    InvalidStoreFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- Translation errors ---
    #[error("No API credentials configured — run `glossa configure` and `glossa set-key` first")]
    NotConfigured,

    #[error("Authentication failed. Please check your API key.")]
    AuthFailed,

    #[error("Rate limit exceeded. Please try again later.{0}")]
    RateLimited(String),

    #[error("No credits remaining. Please add credits to your API account.")]
    InsufficientQuota,

    #[error("Unexpected response format from API.")]
    InvalidResponse,

    #[error("Network error. Please check your internet connection and API endpoint. ({0})")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for Glossa results.
pub type Result<T> = std::result::Result<T, GlossaError>;
