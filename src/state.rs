use crate::config::AppConfig;
use crate::users::{
    memory::MemoryUserStore,
    repo::{PgUserStore, UserStore},
};
use anyhow::Context;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let users = match &config.database {
            Some(db_cfg) => {
                let db = sqlx::postgres::PgPoolOptions::new()
                    .max_connections(db_cfg.max_connections)
                    .connect(&db_cfg.url)
                    .await
                    .context("connect to database")?;

                sqlx::migrate!("./migrations")
                    .run(&db)
                    .await
                    .context("run migrations")?;

                tracing::info!(max_connections = db_cfg.max_connections, "using postgres user store");
                Arc::new(PgUserStore::new(db)) as Arc<dyn UserStore>
            }
            None => {
                tracing::warn!("DATABASE_URL not set; users are kept in memory and lost on restart");
                Arc::new(MemoryUserStore::new()) as Arc<dyn UserStore>
            }
        };

        Ok(Self { config, users })
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        Self::with_users(Arc::new(MemoryUserStore::new()))
    }

    #[cfg(test)]
    pub fn with_users(users: Arc<dyn UserStore>) -> Self {
        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            database: None,
        });
        Self { config, users }
    }
}
