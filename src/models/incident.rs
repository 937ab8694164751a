use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A citizen-filed incident report.
///
/// `excerpt` is confidential and crosses the storage boundary only as
/// ciphertext; in memory it always holds plaintext. Metadata (sender name,
/// subject, tags, coordinates) stays queryable in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
    pub id: Uuid,
    pub sender_name: String,
    pub subject: String,
    pub excerpt: String,
    pub created_at: DateTime<Utc>,
    pub unread: bool,
    pub tags: Vec<String>,
    pub media_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub messages: Vec<IncidentMessage>,
}

/// Follow-up message on an incident. Immutable once created; ordered by
/// creation time within the incident. `sender_id` is None for anonymous
/// reporters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentMessage {
    pub id: Uuid,
    pub incident_id: Uuid,
    pub sender_id: Option<Uuid>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
