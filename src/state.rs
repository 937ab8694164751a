use crate::{
    config::Config, services::encryption::EncryptionService, websocket::ConnectionRegistry,
};
use sqlx::{Pool, Postgres};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<Postgres>,
    pub registry: ConnectionRegistry,
    pub config: Arc<Config>,
    pub encryption: Arc<EncryptionService>,
}
