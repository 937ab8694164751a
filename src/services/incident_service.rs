use crate::error::AppError;
use crate::models::incident::{Incident, IncidentMessage};
use crate::services::encryption::EncryptionService;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

/// Input for a new incident report. Media is already uploaded by the file
/// storage layer; only the resulting URLs arrive here.
#[derive(Debug)]
pub struct NewIncident {
    pub sender_name: String,
    pub subject: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub media_urls: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

pub struct IncidentService;

impl IncidentService {
    /// Persist a new report. The excerpt is encrypted before it crosses the
    /// storage boundary; the returned entity holds plaintext and starts
    /// unread.
    pub async fn create_incident(
        db: &Pool<Postgres>,
        crypto: &EncryptionService,
        new: NewIncident,
    ) -> Result<Incident, AppError> {
        let sealed_excerpt = crypto.encrypt(new.excerpt.as_bytes())?;

        let row = sqlx::query(
            "INSERT INTO incidents (sender_name, subject, excerpt, tags, media_urls, latitude, longitude) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id, created_at, unread",
        )
        .bind(&new.sender_name)
        .bind(&new.subject)
        .bind(&sealed_excerpt)
        .bind(&new.tags)
        .bind(&new.media_urls)
        .bind(new.latitude)
        .bind(new.longitude)
        .fetch_one(db)
        .await?;

        Ok(Incident {
            id: row.get("id"),
            sender_name: new.sender_name,
            subject: new.subject,
            excerpt: new.excerpt,
            created_at: row.get("created_at"),
            unread: row.get("unread"),
            tags: new.tags,
            media_urls: new.media_urls,
            latitude: new.latitude,
            longitude: new.longitude,
            messages: Vec::new(),
        })
    }

    /// Newest first, each incident carrying its full decrypted message
    /// history in creation order.
    pub async fn list_incidents(
        db: &Pool<Postgres>,
        crypto: &EncryptionService,
    ) -> Result<Vec<Incident>, AppError> {
        let rows = sqlx::query(
            "SELECT id, sender_name, subject, excerpt, created_at, unread, tags, media_urls, latitude, longitude \
             FROM incidents \
             ORDER BY created_at DESC",
        )
        .fetch_all(db)
        .await?;

        let mut incidents = Vec::with_capacity(rows.len());
        for row in rows {
            let id: Uuid = row.get("id");
            let sealed: String = row.get("excerpt");
            let excerpt = crypto.decrypt_to_string(&sealed)?;
            let messages = Self::list_messages(db, crypto, id).await?;

            incidents.push(Incident {
                id,
                sender_name: row.get("sender_name"),
                subject: row.get("subject"),
                excerpt,
                created_at: row.get("created_at"),
                unread: row.get("unread"),
                tags: row.get("tags"),
                media_urls: row.get("media_urls"),
                latitude: row.get("latitude"),
                longitude: row.get("longitude"),
                messages,
            });
        }
        Ok(incidents)
    }

    async fn list_messages(
        db: &Pool<Postgres>,
        crypto: &EncryptionService,
        incident_id: Uuid,
    ) -> Result<Vec<IncidentMessage>, AppError> {
        let rows = sqlx::query(
            "SELECT id, incident_id, sender_id, message, created_at \
             FROM incident_messages \
             WHERE incident_id = $1 \
             ORDER BY created_at ASC",
        )
        .bind(incident_id)
        .fetch_all(db)
        .await?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in rows {
            let sealed: String = row.get("message");
            messages.push(IncidentMessage {
                id: row.get("id"),
                incident_id: row.get("incident_id"),
                sender_id: row.get("sender_id"),
                message: crypto.decrypt_to_string(&sealed)?,
                created_at: row.get("created_at"),
            });
        }
        Ok(messages)
    }

    /// Append a follow-up message and re-raise the parent's unread flag in
    /// the same transaction. `NotFound` when the incident does not exist.
    pub async fn append_message(
        db: &Pool<Postgres>,
        crypto: &EncryptionService,
        incident_id: Uuid,
        sender_id: Option<Uuid>,
        message: &str,
    ) -> Result<IncidentMessage, AppError> {
        let sealed = crypto.encrypt(message.as_bytes())?;

        let mut tx = db.begin().await?;

        let row = sqlx::query(
            "INSERT INTO incident_messages (incident_id, sender_id, message) \
             VALUES ($1, $2, $3) \
             RETURNING id, created_at",
        )
        .bind(incident_id)
        .bind(sender_id)
        .bind(&sealed)
        .fetch_one(&mut *tx)
        .await
        .map_err(not_found_on_fk)?;

        sqlx::query("UPDATE incidents SET unread = TRUE WHERE id = $1")
            .bind(incident_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(IncidentMessage {
            id: row.get("id"),
            incident_id,
            sender_id,
            message: message.to_string(),
            created_at: row.get("created_at"),
        })
    }

    /// Idempotent; already-read and unknown incidents are both no-ops.
    pub async fn mark_read(db: &Pool<Postgres>, incident_id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE incidents SET unread = FALSE WHERE id = $1")
            .bind(incident_id)
            .execute(db)
            .await?;
        Ok(())
    }
}

// Postgres foreign_key_violation on the incident reference means the parent
// incident does not exist.
fn not_found_on_fk(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code().as_deref() == Some("23503") {
            return AppError::NotFound;
        }
    }
    AppError::Database(e)
}
