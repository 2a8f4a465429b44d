use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::app::Client;
use crate::error::{NavigationError, ResolveError};
use crate::layout::LayoutState;
use crate::navigator::{Location, Navigator};
use crate::remote::RemoteRoomService;

/// Where the client ended up after a command, and what it shows.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationReport {
    /// Location the command navigated to; `None` when nothing happened.
    pub location: Option<Location>,
    /// Location after any redirects.
    pub current: Option<Location>,
    pub layout: LayoutState,
    pub session: Map<String, Value>,
}

fn report<R: RemoteRoomService>(client: &Client<R>, location: Option<Location>) -> NavigationReport {
    let router = client.router();
    NavigationReport {
        location,
        current: router.current(),
        layout: router.layout(),
        session: router.session().snapshot(),
    }
}

/// Navigate to `url`.
pub fn open<R: RemoteRoomService>(
    client: &Client<R>,
    url: &str,
) -> Result<NavigationReport, NavigationError> {
    let location = client.navigate(url)?;
    info!(url, route = %location.route, "open command finished");
    Ok(report(client, Some(location)))
}

/// Open a room by id.
pub async fn open_room<R: RemoteRoomService>(
    client: &Client<R>,
    room_id: &str,
) -> Result<NavigationReport, ResolveError> {
    let location = client.go_to_room_by_id(Some(room_id)).await?;
    Ok(report(client, location))
}
