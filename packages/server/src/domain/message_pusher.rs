//! Message delivery trait.
//!
//! The UI layer creates the per-connection channel; implementations keep the
//! channels and deliver serialized messages to them.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::MessagePushError, value_object::ConnectionId};

/// Outbound channel of one connection.
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[async_trait]
pub trait MessagePusher: Send + Sync {
    async fn register_client(&self, connection: ConnectionId, sender: PusherChannel);

    async fn unregister_client(&self, connection: &ConnectionId);

    /// Unicast to one connection.
    async fn push_to(&self, connection: &ConnectionId, content: &str)
    -> Result<(), MessagePushError>;

    /// Multicast to `targets`. Individual failures are logged, not returned.
    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        content: &str,
    ) -> Result<(), MessagePushError>;

    async fn count_clients(&self) -> usize;
}
