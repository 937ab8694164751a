use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use dotenvy::dotenv;
use std::env;
use std::fmt;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub encryption_master_key: [u8; 32],
}

// Manual Debug: the master key and connection string must never reach logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("port", &self.port)
            .field("encryption_master_key", &"[REDACTED]")
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, crate::error::AppError> {
        dotenv().ok();
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| crate::error::AppError::Config("DATABASE_URL missing".into()))?;
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);

        let master_key_b64 = env::var("ENCRYPTION_MASTER_KEY")
            .map_err(|_| crate::error::AppError::Config("ENCRYPTION_MASTER_KEY missing".into()))?;
        let master_key_bytes = STANDARD.decode(master_key_b64.trim()).map_err(|_| {
            crate::error::AppError::Config("ENCRYPTION_MASTER_KEY invalid base64".into())
        })?;
        if master_key_bytes.len() != 32 {
            return Err(crate::error::AppError::Config(
                "ENCRYPTION_MASTER_KEY must decode to 32 bytes".into(),
            ));
        }
        let mut encryption_master_key = [0u8; 32];
        encryption_master_key.copy_from_slice(&master_key_bytes);

        Ok(Self {
            database_url,
            port,
            encryption_master_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_secrets() {
        let cfg = Config {
            database_url: "postgres://user:hunter2@db/prod".into(),
            port: 8080,
            encryption_master_key: [42u8; 32],
        };
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("42"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
