use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A chat message. `recipient_id` of None marks a broadcast-class message.
/// The `message` body is confidential at rest; this struct always holds
/// plaintext. Serialized as-is onto the wire for delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender_id: Option<Uuid>,
    pub recipient_id: Option<Uuid>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
