//! Connection pool setup.
use serde::Deserialize;
use sqlx::postgres::{PgPool, PgPoolOptions};

/// The `postgres` section of the service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PgConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    #[serde(default = "PgConfig::default_minsize")]
    pub minsize: u32,
    #[serde(default = "PgConfig::default_maxsize")]
    pub maxsize: u32,
}

impl PgConfig {
    fn default_minsize() -> u32 {
        1
    }

    fn default_maxsize() -> u32 {
        10
    }

    fn connection_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }
}

/// Owns the pooled connection to Postgres. A thin wrapper so
/// [`PgModel`](crate::model::PgModel) doesn't hold configuration directly.
#[derive(Clone)]
pub struct PgEngine {
    pool: PgPool,
}

impl PgEngine {
    pub async fn connect(config: &PgConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .min_connections(config.minsize)
            .max_connections(config.maxsize)
            .connect(&config.connection_url())
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
