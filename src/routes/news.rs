use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::news::News;
use crate::services::news_service::NewsService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateNewsRequest {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

pub async fn create_news(
    State(state): State<AppState>,
    Json(body): Json<CreateNewsRequest>,
) -> Result<(StatusCode, Json<News>), AppError> {
    if body.title.trim().is_empty() || body.content.trim().is_empty() {
        return Err(AppError::BadRequest("title and content are required".into()));
    }

    let news = NewsService::create(
        &state.db,
        &body.title,
        &body.content,
        body.image_url.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(news)))
}

pub async fn get_news(State(state): State<AppState>) -> Result<Json<Vec<News>>, AppError> {
    let news = NewsService::list(&state.db).await?;
    Ok(Json(news))
}
