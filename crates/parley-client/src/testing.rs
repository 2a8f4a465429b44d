//! Hand-written fakes shared by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use parley_shared::types::{QueryParams, RoomDescriptor, RoomId, RouteParams};

use crate::error::{NavigationError, RemoteError};
use crate::navigator::{Location, Navigator};
use crate::remote::RemoteRoomService;

/// Navigator that records every `go` call and builds `/<route>/<values..>`.
#[derive(Default)]
pub struct RecordingNavigator {
    calls: Mutex<Vec<Location>>,
}

impl RecordingNavigator {
    pub fn calls(&self) -> Vec<Location> {
        self.calls.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn go(
        &self,
        route: &str,
        params: &RouteParams,
        query: &QueryParams,
    ) -> Result<Location, NavigationError> {
        let mut path = format!("/{route}");
        for value in params.values() {
            path.push('/');
            path.push_str(value);
        }
        let location = Location {
            route: route.to_string(),
            path,
            params: params.clone(),
            query: query.clone(),
        };
        self.calls.lock().unwrap().push(location.clone());
        Ok(location)
    }

    fn current(&self) -> Option<Location> {
        self.calls.lock().unwrap().last().cloned()
    }
}

/// Remote room service backed by a map, counting every call.
#[derive(Default)]
pub struct FakeRemote {
    rooms: HashMap<RoomId, RoomDescriptor>,
    calls: AtomicUsize,
    delay: Duration,
}

impl FakeRemote {
    pub fn with_room(mut self, room: RoomDescriptor) -> Self {
        self.rooms.insert(room.id.clone(), room);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RemoteRoomService for FakeRemote {
    async fn get_room_by_id(&self, room_id: &RoomId) -> Result<RoomDescriptor, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.rooms
            .get(room_id)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound(room_id.clone()))
    }
}
