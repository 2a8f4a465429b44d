//! The seam between room dispatch and the host UI's router.

use serde::Serialize;

use parley_shared::types::{QueryParams, RouteParams};

use crate::error::NavigationError;

/// A resolved navigation target.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Location {
    /// Name of the matched route.
    pub route: String,
    /// Path without the query string, e.g. `/channel/general`.
    pub path: String,
    /// Path parameters captured from (or used to build) the path.
    pub params: RouteParams,
    /// Query parameters carried along with the path.
    pub query: QueryParams,
}

impl Location {
    /// Path plus query string.
    pub fn href(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query.to_query_string())
        }
    }
}

/// Something that can move the UI to a named route.
pub trait Navigator: Send + Sync {
    /// Navigate to route `route`, filling its path with `params` and
    /// attaching `query` unchanged.
    fn go(
        &self,
        route: &str,
        params: &RouteParams,
        query: &QueryParams,
    ) -> Result<Location, NavigationError>;

    /// Where the UI currently is, if it has navigated at all.
    fn current(&self) -> Option<Location>;
}
