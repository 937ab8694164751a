pub mod chat_service;
pub mod encryption;
pub mod incident_service;
pub mod news_service;
