//! Per-room-type navigation.
//!
//! Every [`RoomType`] owns a [`RoomRouteStrategy`] that knows which route a
//! room of that type opens under and how to fill the route's path.  The
//! [`RoomTypeRegistry`] is the lookup table the resolver dispatches through.

use std::collections::HashMap;
use std::sync::Arc;

use parley_shared::constants::{ROUTE_CHANNEL, ROUTE_DIRECT, ROUTE_GROUP, ROUTE_LIVE};
use parley_shared::types::{QueryParams, RoomDescriptor, RoomType, RouteParams};

use crate::error::{NavigationError, ResolveError};
use crate::navigator::{Location, Navigator};

/// Opens a room in the UI.
pub trait RoomRouteStrategy: Send + Sync {
    fn open_route_link(
        &self,
        room: &RoomDescriptor,
        query: &QueryParams,
        navigator: &dyn Navigator,
    ) -> Result<Location, NavigationError>;
}

/// Which room field fills the route's path parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKey {
    /// The room's URL name (`name`).
    Name,
    /// The room id.
    Id,
}

/// Strategy that opens a single named route with one path parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRoomRoute {
    route: &'static str,
    param: &'static str,
    key: RouteKey,
}

impl NamedRoomRoute {
    pub const fn new(route: &'static str, param: &'static str, key: RouteKey) -> Self {
        Self { route, param, key }
    }

    /// The built-in route for a room type.
    pub fn for_type(room_type: RoomType) -> Self {
        match room_type {
            RoomType::Channel => Self::new(ROUTE_CHANNEL, "name", RouteKey::Name),
            RoomType::PrivateGroup => Self::new(ROUTE_GROUP, "name", RouteKey::Name),
            RoomType::Direct => Self::new(ROUTE_DIRECT, "rid", RouteKey::Id),
            RoomType::Livechat => Self::new(ROUTE_LIVE, "id", RouteKey::Id),
        }
    }

    pub fn route(&self) -> &'static str {
        self.route
    }
}

impl RoomRouteStrategy for NamedRoomRoute {
    fn open_route_link(
        &self,
        room: &RoomDescriptor,
        query: &QueryParams,
        navigator: &dyn Navigator,
    ) -> Result<Location, NavigationError> {
        let value = match self.key {
            RouteKey::Name => room
                .name
                .clone()
                .filter(|name| !name.is_empty())
                .ok_or_else(|| NavigationError::MissingParam {
                    route: self.route.to_string(),
                    param: self.param.to_string(),
                })?,
            RouteKey::Id => room.id.to_string(),
        };

        let mut params = RouteParams::new();
        params.insert(self.param.to_string(), value);
        navigator.go(self.route, &params, query)
    }
}

/// Lookup table from room type to its navigation strategy.
#[derive(Clone, Default)]
pub struct RoomTypeRegistry {
    strategies: HashMap<RoomType, Arc<dyn RoomRouteStrategy>>,
}

impl RoomTypeRegistry {
    /// An empty registry; every dispatch fails until strategies are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in route for every room type.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for room_type in RoomType::ALL {
            registry.register(room_type, NamedRoomRoute::for_type(room_type));
        }
        registry
    }

    /// Register (or replace) the strategy for a room type.
    pub fn register(
        &mut self,
        room_type: RoomType,
        strategy: impl RoomRouteStrategy + 'static,
    ) -> Option<Arc<dyn RoomRouteStrategy>> {
        self.strategies.insert(room_type, Arc::new(strategy))
    }

    pub fn contains(&self, room_type: RoomType) -> bool {
        self.strategies.contains_key(&room_type)
    }

    /// Open `room` using the strategy registered for the type tag `tag`.
    pub fn open_route_link(
        &self,
        tag: &str,
        room: &RoomDescriptor,
        query: &QueryParams,
        navigator: &dyn Navigator,
    ) -> Result<Location, ResolveError> {
        let room_type =
            RoomType::from_tag(tag).map_err(|_| ResolveError::UnknownRoomType(tag.to_string()))?;
        let strategy = self
            .strategies
            .get(&room_type)
            .ok_or(ResolveError::NoStrategy(room_type))?;

        Ok(strategy.open_route_link(room, query, navigator)?)
    }
}
