use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{
    mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender},
    RwLock,
};
use uuid::Uuid;

use crate::models::Role;

pub mod handlers;
pub mod message_types;
pub mod routing;

/// A live connection as the routing layer sees it: identity only, no
/// channel handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub role: Role,
}

struct Connection {
    user_id: Option<Uuid>,
    role: Role,
    sender: UnboundedSender<String>,
}

/// Registry of live websocket connections.
///
/// All membership changes funnel through the inner lock, so a routing
/// snapshot never observes a half-applied registration. The lock is held
/// only for map access, never across a database call.
#[derive(Default, Clone)]
pub struct ConnectionRegistry {
    inner: Arc<RwLock<HashMap<Uuid, Connection>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a live connection and hand back its delivery channel.
    ///
    /// Connection ids are minted per upgrade; reusing one is a programmer
    /// error.
    pub async fn register(
        &self,
        id: Uuid,
        user_id: Option<Uuid>,
        role: Role,
    ) -> UnboundedReceiver<String> {
        let (tx, rx) = unbounded_channel();
        let mut guard = self.inner.write().await;
        let previous = guard.insert(
            id,
            Connection {
                user_id,
                role,
                sender: tx,
            },
        );
        debug_assert!(previous.is_none(), "duplicate connection id {id}");
        tracing::debug!(connection = %id, total = guard.len(), "connection registered");
        rx
    }

    /// Remove a connection; no-op when already gone. Dropping the sender
    /// ends the session's forwarding loop.
    pub async fn unregister(&self, id: Uuid) {
        let mut guard = self.inner.write().await;
        if guard.remove(&id).is_some() {
            tracing::debug!(connection = %id, total = guard.len(), "connection unregistered");
        }
    }

    /// Consistent point-in-time membership view for routing decisions.
    pub async fn snapshot(&self) -> Vec<ConnectionInfo> {
        let guard = self.inner.read().await;
        guard
            .iter()
            .map(|(id, connection)| ConnectionInfo {
                id: *id,
                user_id: connection.user_id,
                role: connection.role,
            })
            .collect()
    }

    /// Write `payload` to each listed connection. A dead receiver is logged
    /// and skipped; it never aborts delivery to the rest.
    pub async fn deliver(&self, targets: &[Uuid], payload: &str) {
        let guard = self.inner.read().await;
        for id in targets {
            let Some(connection) = guard.get(id) else {
                continue;
            };
            if connection.sender.send(payload.to_string()).is_err() {
                tracing::warn!(connection = %id, "delivery failed, receiver gone");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn snapshot_reflects_membership() {
        let registry = ConnectionRegistry::new();
        let id = Uuid::new_v4();
        let user = Uuid::new_v4();

        let _rx = registry.register(id, Some(user), Role::Police).await;
        let snapshot = registry.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, id);
        assert_eq!(snapshot[0].user_id, Some(user));
        assert_eq!(snapshot[0].role, Role::Police);
    }

    #[tokio::test]
    async fn unregister_twice_is_a_noop_both_times() {
        let registry = ConnectionRegistry::new();
        let id = Uuid::new_v4();

        let _rx = registry.register(id, None, Role::Citizen).await;
        registry.unregister(id).await;
        registry.unregister(id).await;
        assert!(registry.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn delivery_never_reaches_an_unregistered_connection() {
        let registry = ConnectionRegistry::new();
        let gone = Uuid::new_v4();
        let live = Uuid::new_v4();

        let mut gone_rx = registry.register(gone, None, Role::Police).await;
        let mut live_rx = registry.register(live, None, Role::Police).await;
        registry.unregister(gone).await;

        registry.deliver(&[gone, live], "payload").await;
        assert_eq!(live_rx.recv().await.as_deref(), Some("payload"));
        assert!(gone_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn dead_receiver_does_not_abort_remaining_deliveries() {
        let registry = ConnectionRegistry::new();
        let dead = Uuid::new_v4();
        let live = Uuid::new_v4();

        let dead_rx = registry.register(dead, None, Role::Police).await;
        let mut live_rx = registry.register(live, None, Role::Police).await;
        drop(dead_rx);

        registry.deliver(&[dead, live], "payload").await;
        assert_eq!(live_rx.recv().await.as_deref(), Some("payload"));
    }

    #[tokio::test]
    async fn unregister_drops_the_delivery_channel() {
        let registry = ConnectionRegistry::new();
        let id = Uuid::new_v4();

        let mut rx = registry.register(id, None, Role::Citizen).await;
        registry.unregister(id).await;
        assert!(rx.recv().await.is_none());
    }
}
