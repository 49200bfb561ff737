use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the service against the in-memory store.
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = match std::env::var("APP_PORT") {
            Ok(v) => v.parse::<u16>().context("APP_PORT must be a port number")?,
            Err(_) => 8080,
        };

        let database = match std::env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => {
                let max_connections = match std::env::var("DATABASE_MAX_CONNECTIONS") {
                    Ok(v) => v
                        .parse::<u32>()
                        .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
                    Err(_) => 10,
                };
                Some(DatabaseConfig {
                    url,
                    max_connections,
                })
            }
            _ => None,
        };

        Ok(Self {
            host,
            port,
            database,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
