//! Message contract for the President game server.
//!
//! This crate is the boundary the transport collaborator programs
//! against:
//!
//! - [`ClientEvent`] / [`ServerEvent`] — the per-action message table
//! - [`Recipient`] — who each server event is addressed to
//! - [`RoomCode`] — validated human-shareable room identifiers
//! - [`Codec`] / [`JsonCodec`] — byte-level framing
//!
//! It knows nothing about sockets or rooms; it only defines what
//! travels between them.

mod code;
mod codec;
mod error;
mod events;

pub use code::{CODE_ALPHABET, CODE_LENGTH, RoomCode};
pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use events::{ClientEvent, Recipient, ServerEvent};
