//! Human-shareable room codes.
//!
//! Codes are short enough to read over voice chat, so the alphabet
//! drops visually ambiguous characters (0/O, 1/I) and input is
//! normalized to uppercase before validation.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ProtocolError;

/// Length of every room code.
pub const CODE_LENGTH: usize = 6;

/// Characters a room code may contain. No 0/O/1/I.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// A validated room code.
///
/// Construction always goes through [`generate`](RoomCode::generate)
/// or the parsing impls, so a held `RoomCode` is known to be
/// well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomCode(String);

impl RoomCode {
    /// Draws a fresh random code. Uniqueness against live rooms is
    /// the registry's job; it regenerates on collision.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> RoomCode {
        let code = (0..CODE_LENGTH)
            .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
            .collect();
        RoomCode(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RoomCode {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        if code.len() != CODE_LENGTH {
            return Err(ProtocolError::InvalidRoomCode(code));
        }
        if !code.bytes().all(|b| CODE_ALPHABET.contains(&b)) {
            return Err(ProtocolError::InvalidRoomCode(code));
        }
        Ok(RoomCode(code))
    }
}

impl TryFrom<String> for RoomCode {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RoomCode> for String {
    fn from(code: RoomCode) -> String {
        code.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_codes_are_well_formed() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let code = RoomCode::generate(&mut rng);
            assert_eq!(code.as_str().len(), CODE_LENGTH);
            assert!(code.as_str().bytes().all(|b| CODE_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_parse_normalizes_to_uppercase() {
        let code: RoomCode = "abcdef".parse().unwrap();
        assert_eq!(code.as_str(), "ABCDEF");
        assert_eq!("  ABCDEF  ".parse::<RoomCode>().unwrap(), code);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!("ABC".parse::<RoomCode>().is_err());
        assert!("ABCDEFG".parse::<RoomCode>().is_err());
        assert!("".parse::<RoomCode>().is_err());
    }

    #[test]
    fn test_parse_rejects_ambiguous_characters() {
        // 0, O, 1, I are excluded from the alphabet.
        assert!("ABCDE0".parse::<RoomCode>().is_err());
        assert!("ABCDEO".parse::<RoomCode>().is_err());
        assert!("ABCDE1".parse::<RoomCode>().is_err());
        assert!("ABCDEI".parse::<RoomCode>().is_err());
    }

    #[test]
    fn test_serde_round_trip_validates() {
        let code: RoomCode = "QX7M2P".parse().unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"QX7M2P\"");

        let decoded: RoomCode = serde_json::from_str("\"qx7m2p\"").unwrap();
        assert_eq!(decoded, code);

        let bad: Result<RoomCode, _> = serde_json::from_str("\"nope\"");
        assert!(bad.is_err());
    }
}
