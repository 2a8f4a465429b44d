//! Application state shared between the router and the command layer.
//!
//! The [`AppState`] struct is wrapped in `Arc<Mutex<>>` so that every part of
//! the client sees the same signed-in user and readiness flags.

use parley_store::User;

/// Central application state.
pub struct AppState {
    /// The signed-in user.
    /// `None` until a user record is loaded from the store.
    pub user: Option<User>,

    /// Whether the subscription cache has been populated.  The index route
    /// waits for this before redirecting to the user's default room.
    pub subscriptions_ready: bool,

    /// Base URL of the server this client talks to.
    pub server_url: String,
}

impl AppState {
    /// Create a new, signed-out application state.
    pub fn new() -> Self {
        Self {
            user: None,
            subscriptions_ready: false,
            server_url: String::new(),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// `"<route>/<name>"` of the room to open on the index route.
    pub fn default_room(&self) -> Option<&str> {
        self.user.as_ref()?.default_room.as_deref()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
