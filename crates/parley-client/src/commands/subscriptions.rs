use parley_store::{StoreError, Subscription};

use crate::app::Client;
use crate::remote::RemoteRoomService;

/// Every cached subscription, ordered by name.
pub fn list_subscriptions<R: RemoteRoomService>(
    client: &Client<R>,
) -> Result<Vec<Subscription>, StoreError> {
    client.database().list_subscriptions()
}
