//! The client router: matches URLs against the [`RouteTable`], keeps the
//! navigation history and runs each route's action against the layout and
//! session.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::json;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use parley_shared::constants::*;
use parley_shared::types::{QueryParams, RouteParams};

use crate::error::NavigationError;
use crate::events::{emit_event, RouteChangedPayload, EVENT_CHANNEL_CAPACITY, EVENT_ROUTE_CHANGED};
use crate::layout::LayoutState;
use crate::navigator::{Location, Navigator};
use crate::session::Session;
use crate::state::AppState;

use super::{ExitTrigger, RouteAction, RouteDef, RouteTable};

pub struct Router {
    table: RouteTable,
    state: Arc<Mutex<AppState>>,
    session: Arc<Session>,
    layout: Mutex<LayoutState>,
    history: Mutex<Vec<Location>>,
    /// Query of an index visit still waiting for subscriptions.  Only
    /// written while the `state` lock is held, so readiness and the
    /// pending redirect change together.
    pending_index: Mutex<Option<QueryParams>>,
    events: broadcast::Sender<RouteChangedPayload>,
}

impl Router {
    pub fn new(
        table: RouteTable,
        state: Arc<Mutex<AppState>>,
        session: Arc<Session>,
        layout_root: &str,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            table,
            state,
            session,
            layout: Mutex::new(LayoutState::new(layout_root)),
            history: Mutex::new(Vec::new()),
            pending_index: Mutex::new(None),
            events,
        }
    }

    /// Navigate to a URL (`/path?query#fragment`; the fragment is ignored).
    ///
    /// An unmatched path changes nothing and yields
    /// [`NavigationError::NotFound`].
    pub fn navigate(&self, url: &str) -> Result<Location, NavigationError> {
        let url = url.split_once('#').map_or(url, |(before, _)| before);
        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, QueryParams::parse(query)),
            None => (url, QueryParams::new()),
        };

        let Some((def, params)) = self.table.match_path(path) else {
            warn!(path, "no route matches path");
            return Err(NavigationError::NotFound(path.to_string()));
        };

        let location = Location {
            route: def.name.to_string(),
            path: def.pattern.build(&params)?,
            params,
            query,
        };
        self.enter(def, location)
    }

    /// The current location's query parameters (empty before any
    /// navigation).
    pub fn current_query(&self) -> QueryParams {
        lock(&self.history)
            .last()
            .map(|l| l.query.clone())
            .unwrap_or_default()
    }

    pub fn history(&self) -> Vec<Location> {
        lock(&self.history).clone()
    }

    /// Snapshot of the layout.
    pub fn layout(&self) -> LayoutState {
        lock(&self.layout).clone()
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Receive a [`RouteChangedPayload`] for every route entered from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<RouteChangedPayload> {
        self.events.subscribe()
    }

    /// Record that the subscription cache is populated.  If an index visit
    /// was waiting on it, its default-room redirect runs now and the
    /// resulting location is returned.
    pub fn subscriptions_ready(&self) -> Result<Option<Location>, NavigationError> {
        let pending = {
            let mut state = lock(&self.state);
            state.subscriptions_ready = true;
            lock(&self.pending_index).take()
        };

        match pending {
            Some(query) => self.open_default_room(&query).map(Some),
            None => Ok(None),
        }
    }

    fn open_named(
        &self,
        route: &str,
        params: &RouteParams,
        query: &QueryParams,
    ) -> Result<Location, NavigationError> {
        let def = self
            .table
            .by_name(route)
            .ok_or_else(|| NavigationError::UnknownRoute(route.to_string()))?;

        let path = def.pattern.build(params).map_err(|e| match e {
            NavigationError::MissingParam { param, .. } => NavigationError::MissingParam {
                route: route.to_string(),
                param,
            },
            other => other,
        })?;

        let location = Location {
            route: def.name.to_string(),
            path,
            params: params.clone(),
            query: query.clone(),
        };
        self.enter(def, location)
    }

    fn enter(&self, def: &RouteDef, location: Location) -> Result<Location, NavigationError> {
        let previous = {
            let mut history = lock(&self.history);
            let previous = history.last().map(|l| l.route.clone());
            history.push(location.clone());
            previous
        };

        if let Some(previous) = previous.as_deref() {
            self.run_exit_trigger(previous);
        }
        if def.action != RouteAction::Index {
            lock(&self.pending_index).take();
        }

        info!(route = def.name, href = %location.href(), "navigated");
        emit_event(
            &self.events,
            EVENT_ROUTE_CHANGED,
            RouteChangedPayload {
                route: location.route.clone(),
                href: location.href(),
                previous_route: previous,
            },
        );

        self.run_action(def.action, &location)?;
        Ok(location)
    }

    fn run_exit_trigger(&self, route: &str) {
        let trigger = self.table.by_name(route).and_then(|def| def.on_exit);
        match trigger {
            Some(ExitTrigger::MarkLegacyContent) => {
                lock(&self.layout).add_main_content_class(CLASS_LEGACY_CONTENT);
            }
            None => {}
        }
    }

    fn run_action(&self, action: RouteAction, location: &Location) -> Result<(), NavigationError> {
        let params = &location.params;

        match action {
            RouteAction::Index => self.index(&location.query)?,
            RouteAction::Home => self.render_main("home"),
            RouteAction::Directory => self.render_main("directory"),
            RouteAction::Account => {
                let group = params
                    .get("group")
                    .filter(|g| !g.is_empty())
                    .map(|g| capitalize(g))
                    .unwrap_or_else(|| DEFAULT_ACCOUNT_GROUP.to_string());
                self.render_main(&format!("account{group}"));
            }
            RouteAction::CmsPage(page) => {
                self.session.set(SESSION_CMS_PAGE, json!(page));
                self.render(LAYOUT_CMS_PAGE, &[]);
            }
            RouteAction::RoomNotFound => {
                self.session.set(
                    SESSION_ROOM_NOT_FOUND,
                    json!({ "type": params.get("type"), "name": params.get("name") }),
                );
                self.render_main("roomNotFound");
            }
            RouteAction::SecretUrl => self.render("secretURL", &[]),
            RouteAction::Invite => self.render("invite", &[]),
            RouteAction::SetupWizard => self.render("SetupWizardRoute", &[]),
            RouteAction::Admin => {
                let group = params
                    .get("group")
                    .map(String::as_str)
                    .unwrap_or(DEFAULT_ADMIN_GROUP);
                if group == DEFAULT_ADMIN_GROUP {
                    self.render_main("InformationRoute");
                } else {
                    self.render_main("SettingsRoute");
                }
            }
            RouteAction::Room { param } => {
                self.session.set(SESSION_OPENED_ROOM, json!(params.get(param)));
                self.render_main("room");
            }
        }

        Ok(())
    }

    fn index(&self, query: &QueryParams) -> Result<(), NavigationError> {
        self.render_main("loading");

        let signed_in = {
            let state = lock(&self.state);
            if state.is_signed_in() && !state.subscriptions_ready {
                debug!("waiting for subscriptions before opening the default room");
                *lock(&self.pending_index) = Some(query.clone());
                return Ok(());
            }
            state.is_signed_in()
        };

        if !signed_in {
            debug!("no user signed in, redirecting home");
            self.open_named(ROUTE_HOME, &RouteParams::new(), &QueryParams::new())?;
            return Ok(());
        }

        self.open_default_room(query)?;
        Ok(())
    }

    fn open_default_room(&self, query: &QueryParams) -> Result<Location, NavigationError> {
        let default_room = lock(&self.state).default_room().map(String::from);

        let mut parts = default_room.as_deref().unwrap_or_default().split('/');
        if let (Some(route), Some(name)) = (parts.next(), parts.next()) {
            let mut params = RouteParams::new();
            params.insert("name".to_string(), name.to_string());
            match self.open_named(route, &params, query) {
                Ok(location) => return Ok(location),
                Err(e) => {
                    warn!(default_room = ?default_room, error = %e, "default room is not routable");
                }
            }
        }

        self.open_named(ROUTE_HOME, &RouteParams::new(), &QueryParams::new())
    }

    fn render(&self, template: &str, regions: &[(&str, &str)]) {
        lock(&self.layout).render(template, regions.iter().copied());
    }

    fn render_main(&self, center: &str) {
        self.render(LAYOUT_MAIN, &[(REGION_CENTER, center)]);
    }
}

impl Navigator for Router {
    fn go(
        &self,
        route: &str,
        params: &RouteParams,
        query: &QueryParams,
    ) -> Result<Location, NavigationError> {
        self.open_named(route, params, query)
    }

    fn current(&self) -> Option<Location> {
        lock(&self.history).last().cloned()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
