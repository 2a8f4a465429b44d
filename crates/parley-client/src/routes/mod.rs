//! Client route table.
//!
//! Maps URL paths to named routes and the action each route runs when it is
//! entered.  The [`Router`] owns the table and performs navigation.

pub mod pattern;
pub mod router;

use parley_shared::constants::*;

pub use pattern::RoutePattern;
pub use router::Router;

/// What a route does when it is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAction {
    /// Show the loading view, then send the user on to their default room.
    Index,
    Home,
    Directory,
    /// Account settings for the `group` parameter.
    Account,
    /// Static CMS page, identified by its layout setting key.
    CmsPage(&'static str),
    RoomNotFound,
    SecretUrl,
    Invite,
    SetupWizard,
    /// Admin views for the `group` parameter.
    Admin,
    /// A room view; the named path parameter identifies the room.
    Room { param: &'static str },
}

/// Side effect run when leaving a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitTrigger {
    /// Flag the main content area as a legacy view.
    MarkLegacyContent,
}

#[derive(Debug, Clone)]
pub struct RouteDef {
    pub name: &'static str,
    pub pattern: RoutePattern,
    pub action: RouteAction,
    pub on_exit: Option<ExitTrigger>,
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RouteDef>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every route of the chat client.
    pub fn standard() -> Self {
        Self::new()
            .route(ROUTE_INDEX, "/", RouteAction::Index)
            .route(ROUTE_HOME, "/home", RouteAction::Home)
            .route_with_exit(
                ROUTE_DIRECTORY,
                "/directory",
                RouteAction::Directory,
                ExitTrigger::MarkLegacyContent,
            )
            .route_with_exit(
                ROUTE_ACCOUNT,
                "/account/:group?",
                RouteAction::Account,
                ExitTrigger::MarkLegacyContent,
            )
            .route(
                ROUTE_TERMS_OF_SERVICE,
                "/terms-of-service",
                RouteAction::CmsPage("Layout_Terms_of_Service"),
            )
            .route(
                ROUTE_PRIVACY_POLICY,
                "/privacy-policy",
                RouteAction::CmsPage("Layout_Privacy_Policy"),
            )
            .route(
                ROUTE_LEGAL_NOTICE,
                "/legal-notice",
                RouteAction::CmsPage("Layout_Legal_Notice"),
            )
            .route(
                ROUTE_ROOM_NOT_FOUND,
                "/room-not-found/:type/:name",
                RouteAction::RoomNotFound,
            )
            .route(ROUTE_REGISTER_SECRET_URL, "/register/:hash", RouteAction::SecretUrl)
            .route(ROUTE_INVITE, "/invite/:hash", RouteAction::Invite)
            .route(ROUTE_SETUP_WIZARD, "/setup-wizard/:step?", RouteAction::SetupWizard)
            .route(ROUTE_ADMIN, "/admin/:group?", RouteAction::Admin)
            .route(ROUTE_CHANNEL, "/channel/:name", RouteAction::Room { param: "name" })
            .route(ROUTE_GROUP, "/group/:name", RouteAction::Room { param: "name" })
            .route(ROUTE_DIRECT, "/direct/:rid", RouteAction::Room { param: "rid" })
            .route(ROUTE_LIVE, "/live/:id", RouteAction::Room { param: "id" })
    }

    pub fn route(self, name: &'static str, pattern: &str, action: RouteAction) -> Self {
        self.push(name, pattern, action, None)
    }

    pub fn route_with_exit(
        self,
        name: &'static str,
        pattern: &str,
        action: RouteAction,
        on_exit: ExitTrigger,
    ) -> Self {
        self.push(name, pattern, action, Some(on_exit))
    }

    fn push(
        mut self,
        name: &'static str,
        pattern: &str,
        action: RouteAction,
        on_exit: Option<ExitTrigger>,
    ) -> Self {
        self.routes.push(RouteDef {
            name,
            pattern: RoutePattern::parse(pattern),
            action,
            on_exit,
        });
        self
    }

    pub fn by_name(&self, name: &str) -> Option<&RouteDef> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// First route whose pattern matches `path`.
    pub fn match_path(&self, path: &str) -> Option<(&RouteDef, parley_shared::RouteParams)> {
        self.routes
            .iter()
            .find_map(|r| r.pattern.matches(path).map(|params| (r, params)))
    }
}
