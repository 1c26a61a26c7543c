//! Room lifecycle management for the President server.
//!
//! Each room runs as an isolated Tokio task (actor model) owning one
//! game session; commands arrive over a channel and are applied one at
//! a time, which is the whole concurrency story for a room.
//!
//! # Key types
//!
//! - [`SessionRegistry`] — creates/destroys rooms, routes players
//! - [`RoomHandle`] — send commands to a running room actor
//! - [`EventSender`] — where a participant's server events land
//! - [`RegistryConfig`] — tuning (channel size, finished-room retention)

mod error;
mod registry;
mod room;

pub use error::RegistryError;
pub use registry::{RegistryConfig, SessionRegistry};
pub use room::{EventSender, RoomHandle, RoomInfo};
