//! Error types for the protocol layer.

/// Errors that can occur while encoding, decoding, or validating
/// protocol data.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed: malformed, truncated, or wrong shape.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The room code has the wrong length or characters outside the
    /// code alphabet.
    #[error("invalid room code: {0}")]
    InvalidRoomCode(String),
}
