/// Application name
pub const APP_NAME: &str = "Parley";

/// Route names registered by the client router
pub const ROUTE_INDEX: &str = "index";
pub const ROUTE_HOME: &str = "home";
pub const ROUTE_DIRECTORY: &str = "directory";
pub const ROUTE_ACCOUNT: &str = "account";
pub const ROUTE_TERMS_OF_SERVICE: &str = "terms-of-service";
pub const ROUTE_PRIVACY_POLICY: &str = "privacy-policy";
pub const ROUTE_LEGAL_NOTICE: &str = "legal-notice";
pub const ROUTE_ROOM_NOT_FOUND: &str = "room-not-found";
pub const ROUTE_REGISTER_SECRET_URL: &str = "register-secret-url";
pub const ROUTE_INVITE: &str = "invite";
pub const ROUTE_SETUP_WIZARD: &str = "setup-wizard";
pub const ROUTE_ADMIN: &str = "admin";
pub const ROUTE_CHANNEL: &str = "channel";
pub const ROUTE_GROUP: &str = "group";
pub const ROUTE_DIRECT: &str = "direct";
pub const ROUTE_LIVE: &str = "live";

/// Pseudo route name recorded when no route matches a path
pub const ROUTE_NOT_FOUND: &str = "not-found";

/// Session variable keys
pub const SESSION_CMS_PAGE: &str = "cmsPage";
pub const SESSION_ROOM_NOT_FOUND: &str = "roomNotFound";
pub const SESSION_OPENED_ROOM: &str = "openedRoom";

/// Layout templates and regions
pub const LAYOUT_MAIN: &str = "main";
pub const LAYOUT_CMS_PAGE: &str = "cmsPage";
pub const REGION_CENTER: &str = "center";

/// CSS class applied to the main content area when leaving legacy views
pub const CLASS_LEGACY_CONTENT: &str = "rc-old";

/// Default account settings group
pub const DEFAULT_ACCOUNT_GROUP: &str = "Preferences";

/// Default admin group
pub const DEFAULT_ADMIN_GROUP: &str = "info";
