use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub mod chat;
pub mod incidents;
pub mod news;
pub mod stations;

use chat::get_chat_messages;
use incidents::{add_incident_message, create_incident, get_incidents, mark_incident_read};
use news::{create_news, get_news};
use stations::nearest_police_station;

pub fn build_router() -> Router<AppState> {
    let api = Router::new()
        .route("/incidents", post(create_incident))
        .route("/incidents", get(get_incidents))
        .route("/incidents/:incident_id/messages", post(add_incident_message))
        .route("/incidents/:incident_id/read", put(mark_incident_read))
        .route("/chat/messages", get(get_chat_messages))
        .route("/news", get(get_news))
        .route("/news", post(create_news))
        .route("/police-stations/nearest", get(nearest_police_station));

    let router = Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/api", api)
        .route("/ws/chat", get(crate::websocket::handlers::ws_handler));

    crate::middleware::with_defaults(router)
}
