//! clan-dashboard: HTTP reporting backend for a clan management dashboard.
//!
//! Startup order: configuration, logging, store, optional seed import,
//! authenticator, then the Axum server until SIGINT/SIGTERM.

mod config;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use server::{ServerState, StaticTokenAuthenticator, create_app};
use storage::{ClanRepository, DocumentStore, FileStore, MemoryStore, SeedData, SeedReport};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, Cli, LogFormat, StoreBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Arc::new(AppConfig::from(Cli::parse()));
    init_tracing(config.log_format);

    let store: Arc<dyn DocumentStore> = match &config.store {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::File(dir) => Arc::new(
            FileStore::open(dir.clone())
                .await
                .with_context(|| format!("failed to open data directory {}", dir.display()))?,
        ),
    };
    let repo =
        ClanRepository::new(store, config.tenant.clone()).with_deadline(config.store_deadline);

    if let Some(path) = &config.seed {
        let report = load_seed(&repo, path).await?;
        info!(
            path = %path.display(),
            members = report.members,
            seasons = report.seasons,
            snapshots = report.snapshots,
            events = report.events,
            "Seed imported"
        );
    }

    let authenticator = StaticTokenAuthenticator::from_entries(&config.auth_tokens)?;
    if authenticator.is_empty() {
        warn!("No auth tokens configured; principal-only routes will reject every request");
    }

    let state = ServerState::new(
        repo,
        config.series_config(),
        Arc::new(authenticator),
        config.app_name.as_str(),
    );
    let app = create_app(state, &config.server);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        app = %config.app_name,
        %addr,
        store = ?config.store,
        tenant = %config.tenant,
        merits = config.merits_aggregation.as_str(),
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .context("server failed")?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn load_seed(repo: &ClanRepository, path: &Path) -> anyhow::Result<SeedReport> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    let seed: SeedData = serde_json::from_str(&raw)
        .with_context(|| format!("seed file {} is not valid JSON", path.display()))?;
    let report = storage::import_seed(repo, seed).await?;
    Ok(report)
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(err) => {
                warn!(error = %err, "SIGTERM handler unavailable, waiting for Ctrl-C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received, draining connections");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;
    use types::TenantId;

    #[tokio::test]
    async fn test_load_seed_populates_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seed.json");
        let seed = json!({
            "members": {"m1": {"nickname": "Ash"}, "m2": {}},
            "seasons": [{"name": "S1", "weeks": [{"start": "2024-01-01", "end": "2024-01-07"}]}],
            "snapshots": [{"memberId": "m1", "recordedOn": "2024-01-02", "manaSpent": 10}],
            "events": [{"title": "Muster", "time": "Mon 19:00"}]
        });
        std::fs::write(&path, seed.to_string()).unwrap();

        let repo = ClanRepository::new(Arc::new(MemoryStore::new()), TenantId::default());
        let report = load_seed(&repo, &path).await.unwrap();

        assert_eq!(report.members, 2);
        assert_eq!(report.seasons, 1);
        assert_eq!(report.snapshots, 1);
        assert_eq!(report.events, 1);
        assert_eq!(repo.events().await.unwrap()[0].title, "Muster");
    }

    #[tokio::test]
    async fn test_load_seed_rejects_bad_events() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seed.json");
        std::fs::write(&path, r#"{"events": [{"title": "No time"}]}"#).unwrap();

        let repo = ClanRepository::new(Arc::new(MemoryStore::new()), TenantId::default());
        assert!(load_seed(&repo, &path).await.is_err());
        assert!(repo.events().await.unwrap().is_empty());
    }
}
