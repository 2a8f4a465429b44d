//! Domain model structs persisted in the local database.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! directly to the UI layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use parley_shared::types::{RoomDescriptor, RoomId};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// The signed-in user as last seen by this client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Server-issued user id.
    pub id: String,
    /// Login name.
    pub username: String,
    /// Room to open on the index route, as `"<route>/<name>"`.
    pub default_room: Option<String>,
    /// When this record was last written.
    pub saved_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// A room the local user is a member of.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subscription {
    /// Room id.
    pub rid: RoomId,
    /// Room type tag (`c`, `p`, `d`, `l`).
    pub t: String,
    /// URL-friendly room name.
    pub name: String,
    /// Human-readable display name.
    pub fname: Option<String>,
    /// Whether the room is shown in the sidebar.
    pub open: bool,
    /// Unread message count.
    pub unread: i64,
    /// Last time the subscription was written locally.
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    /// The subset of fields used for route dispatch.
    pub fn descriptor(&self) -> RoomDescriptor {
        RoomDescriptor {
            id: self.rid.clone(),
            t: self.t.clone(),
            name: Some(self.name.clone()),
            fname: self.fname.clone(),
        }
    }
}
