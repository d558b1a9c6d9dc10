use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::info;
use tutorhub_auth::Authenticator;
use tutorhub_config::{AppConfig, WorkflowConfig};
use tutorhub_database::{prepare_database, run_migrations};

pub mod telemetry {
    use anyhow::Result;
    use tracing::Level;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    /// Install the global fmt subscriber. `RUST_LOG` overrides the default
    /// `info` filter.
    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::TRACE)
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// Everything a request handler needs, built once at startup.
#[derive(Clone)]
pub struct BackendServices {
    pub db_pool: SqlitePool,
    pub authenticator: Authenticator,
    pub workflow: WorkflowConfig,
}

impl BackendServices {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let db_pool = prepare_database(&config.database).await?;
        run_migrations(&db_pool).await?;

        let authenticator = Authenticator::new(db_pool.clone(), config.auth.clone());

        info!(
            session_ttl_seconds = config.auth.session_ttl_seconds,
            join_redirect_delay_ms = config.workflow.join_redirect_delay_ms,
            "backend services ready"
        );

        Ok(Self {
            db_pool,
            authenticator,
            workflow: config.workflow.clone(),
        })
    }

    /// Apply pending migrations without building the rest of the services.
    pub async fn migrate(config: &AppConfig) -> Result<()> {
        let pool = prepare_database(&config.database).await?;
        run_migrations(&pool)
            .await
            .with_context(|| format!("failed to migrate {}", config.database.url))?;
        pool.close().await;
        Ok(())
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
