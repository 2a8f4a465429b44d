//! Room resolution: turn a room id into a navigation.
//!
//! The local subscription cache is consulted first.  Rooms the user has not
//! joined are fetched from the server once per id; concurrent resolutions
//! of the same id share that fetch.  The room's type tag then selects the
//! route strategy that performs the navigation.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use parley_shared::types::{QueryParams, RoomDescriptor, RoomId};
use parley_store::{Database, StoreError};

use crate::error::{RemoteError, ResolveError};
use crate::navigator::{Location, Navigator};
use crate::remote::RemoteRoomService;
use crate::room_types::RoomTypeRegistry;
use crate::single_flight::SingleFlight;

/// Synchronous lookup in the local subscription cache.
pub trait SubscriptionStore: Send + Sync {
    fn find_subscription(&self, room_id: &RoomId) -> Result<Option<RoomDescriptor>, StoreError>;
}

impl SubscriptionStore for Mutex<Database> {
    fn find_subscription(&self, room_id: &RoomId) -> Result<Option<RoomDescriptor>, StoreError> {
        let db = self.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(db.get_subscription(room_id)?.map(|sub| sub.descriptor()))
    }
}

pub struct RoomResolver<S, R> {
    subscriptions: Arc<S>,
    remote: Arc<R>,
    rooms: SingleFlight<RoomId, RoomDescriptor, RemoteError>,
    room_types: Arc<RoomTypeRegistry>,
    navigator: Arc<dyn Navigator>,
}

impl<S, R> RoomResolver<S, R>
where
    S: SubscriptionStore,
    R: RemoteRoomService,
{
    pub fn new(
        subscriptions: Arc<S>,
        remote: Arc<R>,
        room_types: Arc<RoomTypeRegistry>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            subscriptions,
            remote,
            rooms: SingleFlight::new(),
            room_types,
            navigator,
        }
    }

    /// Open the room `room_id`, forwarding `query` untouched to the route
    /// strategy.
    ///
    /// Returns `Ok(None)` without navigating when `room_id` is empty.
    /// Neither the subscription nor the fetched room is modified.
    pub async fn resolve(
        &self,
        room_id: &str,
        query: &QueryParams,
    ) -> Result<Option<Location>, ResolveError> {
        let room_id = RoomId::new(room_id);
        if room_id.is_empty() {
            debug!("resolve called without a room id, ignoring");
            return Ok(None);
        }

        if let Some(subscription) = self.subscriptions.find_subscription(&room_id)? {
            debug!(room_id = %room_id, "room found in subscription cache");
            return self.dispatch(&subscription, query).map(Some);
        }

        let room = self.fetch_room(&room_id).await?;
        self.dispatch(&room, query).map(Some)
    }

    /// Rooms fetched from the server so far (pending or completed).
    pub fn fetched_rooms(&self) -> usize {
        self.rooms.len()
    }

    async fn fetch_room(&self, room_id: &RoomId) -> Result<RoomDescriptor, RemoteError> {
        let remote = Arc::clone(&self.remote);
        let id = room_id.clone();

        self.rooms
            .get_or_fetch(room_id.clone(), move || async move {
                remote.get_room_by_id(&id).await
            })
            .await
            .map_err(|e| {
                warn!(room_id = %room_id, error = %e, "remote room lookup failed");
                e
            })
    }

    fn dispatch(
        &self,
        room: &RoomDescriptor,
        query: &QueryParams,
    ) -> Result<Location, ResolveError> {
        let location =
            self.room_types
                .open_route_link(&room.t, room, query, self.navigator.as_ref())?;

        info!(
            room_id = %room.id,
            room_type = %room.t,
            path = %location.path,
            "room opened"
        );

        Ok(location)
    }
}
