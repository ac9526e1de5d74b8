use anyhow::Result;
use std::sync::Arc;
use student_registry::config::{AppConfig, StorageBackend};
use student_registry::core::service::StudentService;
use student_registry::server::ServerBuilder;
use student_registry::storage::InMemoryStudentService;
use student_registry::telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    telemetry::init(&config.logging)?;

    let service = build_service(&config).await?;
    tracing::info!(backend = ?config.storage.backend, "Storage ready");

    ServerBuilder::new()
        .with_shared_service(service)
        .with_pagination(config.pagination.clone())
        .serve(&config.server.address())
        .await
}

async fn build_service(config: &AppConfig) -> Result<Arc<dyn StudentService>> {
    match config.storage.backend {
        StorageBackend::InMemory => Ok(Arc::new(InMemoryStudentService::new())),
        StorageBackend::Postgres => connect_postgres(config).await,
    }
}

#[cfg(feature = "postgres")]
async fn connect_postgres(config: &AppConfig) -> Result<Arc<dyn StudentService>> {
    use student_registry::storage::PostgresStudentService;

    let url = config
        .storage
        .database_url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("storage.database_url is required"))?;
    let service = PostgresStudentService::connect(url, config.storage.max_connections).await?;
    service.migrate().await?;
    Ok(Arc::new(service))
}

#[cfg(not(feature = "postgres"))]
async fn connect_postgres(_config: &AppConfig) -> Result<Arc<dyn StudentService>> {
    anyhow::bail!("the postgres backend requires building with `--features postgres`")
}
