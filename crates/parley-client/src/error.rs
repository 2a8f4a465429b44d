use thiserror::Error;

use parley_shared::types::{RoomId, RoomType};
use parley_store::StoreError;

/// Failure of a remote room lookup.
///
/// `Clone` so that one outcome can be handed to every caller waiting on the
/// same in-flight lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Room not found: {0}")]
    NotFound(RoomId),

    #[error("Server responded {status} for room {room_id}")]
    Status { room_id: RoomId, status: u16 },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid server response: {0}")]
    Decode(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("No route named {0:?}")]
    UnknownRoute(String),

    #[error("Route {route:?} requires parameter {param:?}")]
    MissingParam { route: String, param: String },

    #[error("No route matches {0:?}")]
    NotFound(String),
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Subscription lookup failed: {0}")]
    Store(#[from] StoreError),

    #[error("Remote room lookup failed: {0}")]
    Remote(#[from] RemoteError),

    #[error("Unknown room type: {0:?}")]
    UnknownRoomType(String),

    #[error("No route strategy registered for room type {0}")]
    NoStrategy(RoomType),

    #[error("Navigation failed: {0}")]
    Navigation(#[from] NavigationError),
}
