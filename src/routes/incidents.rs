use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::incident::{Incident, IncidentMessage};
use crate::services::incident_service::{IncidentService, NewIncident};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateIncidentRequest {
    pub sender: String,
    pub subject: String,
    pub excerpt: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub media_urls: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

pub async fn create_incident(
    State(state): State<AppState>,
    Json(body): Json<CreateIncidentRequest>,
) -> Result<(StatusCode, Json<Incident>), AppError> {
    if body.sender.trim().is_empty()
        || body.subject.trim().is_empty()
        || body.excerpt.trim().is_empty()
    {
        return Err(AppError::BadRequest(
            "sender, subject and excerpt are required".into(),
        ));
    }
    if let Some(latitude) = body.latitude {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(AppError::BadRequest("invalid latitude".into()));
        }
    }
    if let Some(longitude) = body.longitude {
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(AppError::BadRequest("invalid longitude".into()));
        }
    }

    let incident = IncidentService::create_incident(
        &state.db,
        &state.encryption,
        NewIncident {
            sender_name: body.sender,
            subject: body.subject,
            excerpt: body.excerpt,
            tags: body.tags,
            media_urls: body.media_urls,
            latitude: body.latitude,
            longitude: body.longitude,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(incident)))
}

pub async fn get_incidents(State(state): State<AppState>) -> Result<Json<Vec<Incident>>, AppError> {
    let incidents = IncidentService::list_incidents(&state.db, &state.encryption).await?;
    Ok(Json(incidents))
}

#[derive(Debug, Deserialize)]
pub struct AddIncidentMessageRequest {
    pub message: String,
    pub sender_id: Option<Uuid>,
}

pub async fn add_incident_message(
    State(state): State<AppState>,
    Path(incident_id): Path<Uuid>,
    Json(body): Json<AddIncidentMessageRequest>,
) -> Result<(StatusCode, Json<IncidentMessage>), AppError> {
    if body.message.trim().is_empty() {
        return Err(AppError::BadRequest("message is required".into()));
    }

    let message = IncidentService::append_message(
        &state.db,
        &state.encryption,
        incident_id,
        body.sender_id,
        &body.message,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

pub async fn mark_incident_read(
    State(state): State<AppState>,
    Path(incident_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    IncidentService::mark_read(&state.db, incident_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
