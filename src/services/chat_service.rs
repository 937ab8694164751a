use crate::error::AppError;
use crate::models::chat::ChatMessage;
use crate::services::encryption::EncryptionService;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

pub struct ChatService;

impl ChatService {
    /// Persist a chat message with a server-assigned id and timestamp. The
    /// body is encrypted before the insert; the returned entity holds
    /// plaintext for delivery.
    pub async fn create_message(
        db: &Pool<Postgres>,
        crypto: &EncryptionService,
        sender_id: Option<Uuid>,
        recipient_id: Option<Uuid>,
        message: &str,
    ) -> Result<ChatMessage, AppError> {
        let sealed = crypto.encrypt(message.as_bytes())?;

        let row = sqlx::query(
            "INSERT INTO chat_messages (sender_id, recipient_id, message) \
             VALUES ($1, $2, $3) \
             RETURNING id, created_at",
        )
        .bind(sender_id)
        .bind(recipient_id)
        .bind(&sealed)
        .fetch_one(db)
        .await?;

        Ok(ChatMessage {
            id: row.get("id"),
            sender_id,
            recipient_id,
            message: message.to_string(),
            created_at: row.get("created_at"),
        })
    }

    /// Everything the principal sent, received, or that was addressed to the
    /// whole channel; oldest first, bodies decrypted.
    ///
    /// With no principal only broadcast-class messages match: a NULL
    /// sender_id never equals the bind parameter.
    pub async fn list_for(
        db: &Pool<Postgres>,
        crypto: &EncryptionService,
        principal: Option<Uuid>,
    ) -> Result<Vec<ChatMessage>, AppError> {
        let rows = sqlx::query(
            "SELECT id, sender_id, recipient_id, message, created_at \
             FROM chat_messages \
             WHERE sender_id = $1 OR recipient_id = $1 OR recipient_id IS NULL \
             ORDER BY created_at ASC",
        )
        .bind(principal)
        .fetch_all(db)
        .await?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in rows {
            let sealed: String = row.get("message");
            messages.push(ChatMessage {
                id: row.get("id"),
                sender_id: row.get("sender_id"),
                recipient_id: row.get("recipient_id"),
                message: crypto.decrypt_to_string(&sealed)?,
                created_at: row.get("created_at"),
            });
        }
        Ok(messages)
    }
}
