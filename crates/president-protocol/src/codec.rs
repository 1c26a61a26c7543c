//! Codec seam between events and raw frames.
//!
//! The core never touches bytes; the transport collaborator picks a
//! [`Codec`] and hands decoded events in. [`JsonCodec`] is the default
//! and what the browser client speaks.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes and decodes protocol values.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

/// A [`Codec`] backed by `serde_json`.
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::{ClientEvent, ServerEvent};
    use president_core::PlayerId;

    #[test]
    fn test_json_codec_round_trips_events() {
        let codec = JsonCodec;
        let event = ClientEvent::ToggleReady;
        let bytes = codec.encode(&event).unwrap();
        let decoded: ClientEvent = codec.decode(&bytes).unwrap();
        assert_eq!(event, decoded);

        let event = ServerEvent::PlayerLeft {
            player_id: PlayerId::random(),
        };
        let bytes = codec.encode(&event).unwrap();
        let decoded: ServerEvent = codec.decode(&bytes).unwrap();
        assert_eq!(event, decoded);
    }

    #[test]
    fn test_json_codec_rejects_garbage() {
        let codec = JsonCodec;
        let result: Result<ClientEvent, _> = codec.decode(b"not json at all");
        assert!(result.is_err());
    }
}
