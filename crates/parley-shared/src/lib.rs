//! # parley-shared
//!
//! Value types shared by the store and the client: room identifiers, room
//! type tags, the descriptor shape used for route dispatch, and URL
//! query/path parameter maps.

pub mod constants;
pub mod error;
pub mod types;

pub use error::{ParleyError, Result};
pub use types::{QueryParams, RoomDescriptor, RoomId, RoomType, RouteParams};
