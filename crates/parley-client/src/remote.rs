//! Remote room lookup, used when a room is not in the local subscription
//! cache.

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use parley_shared::types::{RoomDescriptor, RoomId};

use crate::error::RemoteError;

/// Fetches room descriptors from the server.
pub trait RemoteRoomService: Send + Sync + 'static {
    fn get_room_by_id(
        &self,
        room_id: &RoomId,
    ) -> impl Future<Output = Result<RoomDescriptor, RemoteError>> + Send;
}

/// [`RemoteRoomService`] over the server's REST API:
/// `GET {server}/api/v1/rooms/{rid}`.
#[derive(Debug, Clone)]
pub struct HttpRoomService {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpRoomService {
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let base_url = Url::parse(server_url)
            .map_err(|e| RemoteError::Transport(format!("Invalid server URL {server_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(RemoteError::Transport(format!(
                "Server URL {server_url:?} cannot be used as a base"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Endpoint for a single room.
    pub fn room_url(&self, room_id: &RoomId) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "v1", "rooms", room_id.as_str()]);
        }
        url
    }
}

impl RemoteRoomService for HttpRoomService {
    async fn get_room_by_id(&self, room_id: &RoomId) -> Result<RoomDescriptor, RemoteError> {
        let url = self.room_url(room_id);
        debug!(room_id = %room_id, url = %url, "fetching room from server");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(RemoteError::NotFound(room_id.clone()));
        }
        if !status.is_success() {
            return Err(RemoteError::Status {
                room_id: room_id.clone(),
                status: status.as_u16(),
            });
        }

        resp.json::<RoomDescriptor>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_url_appends_to_base_path() {
        let svc = HttpRoomService::new("https://chat.example.org", Duration::from_secs(5)).unwrap();
        assert_eq!(
            svc.room_url(&RoomId::new("GENERAL")).as_str(),
            "https://chat.example.org/api/v1/rooms/GENERAL"
        );

        let svc =
            HttpRoomService::new("https://example.org/chat/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            svc.room_url(&RoomId::new("a b")).as_str(),
            "https://example.org/chat/api/v1/rooms/a%20b"
        );
    }

    #[test]
    fn rejects_unusable_server_urls() {
        assert!(HttpRoomService::new("not a url", Duration::from_secs(5)).is_err());
        assert!(HttpRoomService::new("mailto:ops@example.org", Duration::from_secs(5)).is_err());
    }

    fn service(server: &mockito::ServerGuard) -> HttpRoomService {
        HttpRoomService::new(&server.url(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn fetches_room_descriptor() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/rooms/dm42")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"_id":"dm42","t":"d","fname":"Alice"}"#)
            .create_async()
            .await;

        let room = service(&server)
            .get_room_by_id(&RoomId::new("dm42"))
            .await
            .unwrap();

        assert_eq!(room.id, RoomId::new("dm42"));
        assert_eq!(room.t, "d");
        assert_eq!(room.fname.as_deref(), Some("Alice"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_room_maps_to_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/rooms/ghost")
            .with_status(404)
            .with_body("not found")
            .create_async()
            .await;

        let err = service(&server)
            .get_room_by_id(&RoomId::new("ghost"))
            .await
            .unwrap_err();
        assert_eq!(err, RemoteError::NotFound(RoomId::new("ghost")));
    }

    #[tokio::test]
    async fn server_error_maps_to_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/rooms/abc")
            .with_status(500)
            .create_async()
            .await;

        let err = service(&server)
            .get_room_by_id(&RoomId::new("abc"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            RemoteError::Status {
                room_id: RoomId::new("abc"),
                status: 500
            }
        );
    }

    #[tokio::test]
    async fn malformed_body_maps_to_decode() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/rooms/abc")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name":"no id or type"}"#)
            .create_async()
            .await;

        let err = service(&server)
            .get_room_by_id(&RoomId::new("abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Decode(_)), "got {err:?}");
    }
}
