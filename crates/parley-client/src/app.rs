//! Wiring of the client: store, router, room-type registry and resolver.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Context;
use tracing::info;

use parley_store::{Database, StoreError};

use crate::config::ClientConfig;
use crate::error::{NavigationError, ResolveError};
use crate::navigator::{Location, Navigator};
use crate::remote::{HttpRoomService, RemoteRoomService};
use crate::resolver::RoomResolver;
use crate::room_types::RoomTypeRegistry;
use crate::routes::{RouteTable, Router};
use crate::session::Session;
use crate::state::AppState;

pub struct Client<R = HttpRoomService> {
    state: Arc<Mutex<AppState>>,
    database: Arc<Mutex<Database>>,
    router: Arc<Router>,
    resolver: RoomResolver<Mutex<Database>, R>,
}

impl Client<HttpRoomService> {
    /// Open the configured database and connect the resolver to the
    /// configured server.
    pub fn from_config(config: &ClientConfig) -> anyhow::Result<Self> {
        let database = match &config.database_path {
            Some(path) => Database::open_at(path)
                .with_context(|| format!("opening database at {}", path.display()))?,
            None => Database::new().context("opening default database")?,
        };

        let remote = HttpRoomService::new(&config.server_url, config.request_timeout)?;

        let client = Self::new(database, remote, &config.layout_root)?;
        client.lock_state().server_url = config.server_url.clone();

        info!(server_url = %config.server_url, "client ready");
        Ok(client)
    }
}

impl<R: RemoteRoomService> Client<R> {
    pub fn new(database: Database, remote: R, layout_root: &str) -> Result<Self, StoreError> {
        let user = database.current_user()?;
        let state = Arc::new(Mutex::new(AppState {
            user,
            ..AppState::new()
        }));

        let router = Arc::new(Router::new(
            RouteTable::standard(),
            Arc::clone(&state),
            Arc::new(Session::new()),
            layout_root,
        ));
        let navigator: Arc<dyn Navigator> = router.clone();

        let database = Arc::new(Mutex::new(database));
        let resolver = RoomResolver::new(
            Arc::clone(&database),
            Arc::new(remote),
            Arc::new(RoomTypeRegistry::with_defaults()),
            navigator,
        );

        Ok(Self {
            state,
            database,
            router,
            resolver,
        })
    }

    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    pub fn state(&self) -> &Arc<Mutex<AppState>> {
        &self.state
    }

    pub fn database(&self) -> MutexGuard<'_, Database> {
        self.database.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open a room by id, keeping the current query parameters.
    /// `None` or an empty id does nothing.
    pub async fn go_to_room_by_id(
        &self,
        room_id: Option<&str>,
    ) -> Result<Option<Location>, ResolveError> {
        let Some(room_id) = room_id else {
            return Ok(None);
        };
        let query = self.router.current_query();
        self.resolver.resolve(room_id, &query).await
    }

    pub fn navigate(&self, url: &str) -> Result<Location, NavigationError> {
        self.router.navigate(url)
    }

    /// Signal that the local subscription cache is populated.
    pub fn mark_subscriptions_ready(&self) -> Result<Option<Location>, NavigationError> {
        self.router.subscriptions_ready()
    }

    fn lock_state(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use parley_shared::constants::{ROUTE_CHANNEL, ROUTE_DIRECT, ROUTE_HOME};
    use parley_shared::types::{RoomDescriptor, RoomId};
    use parley_store::{Subscription, User};

    use super::*;
    use crate::testing::FakeRemote;

    fn client(remote: FakeRemote) -> Client<FakeRemote> {
        let db = Database::open_in_memory().unwrap();
        db.save_user(&User {
            id: "u1".into(),
            username: "alice".into(),
            default_room: Some("channel/general".into()),
            saved_at: Utc::now(),
        })
        .unwrap();
        db.upsert_subscription(&Subscription {
            rid: RoomId::new("GENERAL"),
            t: "c".into(),
            name: "general".into(),
            fname: None,
            open: true,
            unread: 0,
            updated_at: Utc::now(),
        })
        .unwrap();
        Client::new(db, remote, "body").unwrap()
    }

    #[test]
    fn loads_signed_in_user_from_store() {
        let client = client(FakeRemote::default());
        let state = client.state().lock().unwrap();
        assert_eq!(state.user.as_ref().map(|u| u.username.as_str()), Some("alice"));
        assert!(!state.subscriptions_ready);
    }

    #[test]
    fn index_redirect_runs_once_subscriptions_are_ready() {
        let client = client(FakeRemote::default());
        client.navigate("/").unwrap();

        let location = client.mark_subscriptions_ready().unwrap().unwrap();
        assert_eq!(location.route, ROUTE_CHANNEL);
        assert_eq!(location.path, "/channel/general");
    }

    #[tokio::test]
    async fn absent_room_id_does_nothing() {
        let client = client(FakeRemote::default());
        assert!(client.go_to_room_by_id(None).await.unwrap().is_none());
        assert!(client.go_to_room_by_id(Some("")).await.unwrap().is_none());
        assert!(client.router().history().is_empty());
    }

    #[tokio::test]
    async fn go_to_room_keeps_current_query() {
        let remote = FakeRemote::default().with_room(RoomDescriptor::new("dm42", "d"));
        let client = client(remote);
        client.navigate("/home?layout=embedded").unwrap();

        let location = client.go_to_room_by_id(Some("dm42")).await.unwrap().unwrap();

        assert_eq!(location.route, ROUTE_DIRECT);
        assert_eq!(location.href(), "/direct/dm42?layout=embedded");
        assert_eq!(client.router().current(), Some(location));
    }

    #[tokio::test]
    async fn subscribed_room_opens_through_router() {
        let client = client(FakeRemote::default());

        let location = client
            .go_to_room_by_id(Some("GENERAL"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(location.href(), "/channel/general");
        let routes: Vec<_> = client
            .router()
            .history()
            .into_iter()
            .map(|l| l.route)
            .collect();
        assert_eq!(routes, [ROUTE_CHANNEL]);
    }

    #[tokio::test]
    async fn missing_room_leaves_ui_in_place() {
        let client = client(FakeRemote::default());
        client.navigate("/home").unwrap();

        let err = client.go_to_room_by_id(Some("ghost")).await.unwrap_err();
        assert!(matches!(err, ResolveError::Remote(_)));
        assert_eq!(client.router().current().unwrap().route, ROUTE_HOME);
    }
}
