use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::chat::ChatMessage;
use crate::services::chat_service::ChatService;
use crate::state::AppState;

/// The caller's principal id; absent for anonymous citizens, who only see
/// broadcast-class messages.
#[derive(Debug, Deserialize)]
pub struct ChatHistoryParams {
    pub user_id: Option<Uuid>,
}

pub async fn get_chat_messages(
    State(state): State<AppState>,
    Query(params): Query<ChatHistoryParams>,
) -> Result<Json<Vec<ChatMessage>>, AppError> {
    let messages = ChatService::list_for(&state.db, &state.encryption, params.user_id).await?;
    Ok(Json(messages))
}
