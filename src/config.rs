//! Process configuration.
//!
//! Parsed once at start from CLI flags (each with an environment fallback)
//! and shared read-only afterwards.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};
use reports::SeriesConfig;
use server::ServerConfig;
use types::{Aggregation, MetricKind, TenantId};

/// Command-line interface.
#[derive(Debug, Parser)]
#[command(name = "clan-dashboard")]
#[command(about = "Reporting backend for a clan management dashboard")]
pub struct Cli {
    /// Application name reported by /health
    #[arg(long, env = "CLAN_APP_NAME", default_value = "clan-dashboard")]
    pub app_name: String,

    /// Host to bind to
    #[arg(long, env = "CLAN_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "CLAN_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Document store: `memory`, or a directory for the JSON file store
    #[arg(long, env = "CLAN_STORE", default_value = "memory", value_parser = parse_store)]
    pub store: StoreBackend,

    /// Tenant whose schedule is served
    #[arg(long, env = "CLAN_TENANT", default_value = "default")]
    pub tenant: String,

    /// Deadline for each store call, in milliseconds
    #[arg(long, env = "CLAN_STORE_DEADLINE_MS", default_value_t = 5000)]
    pub store_deadline_ms: u64,

    /// Bearer token entries, `token=member_id:email`
    #[arg(long = "auth-token", env = "CLAN_AUTH_TOKENS", value_delimiter = ',')]
    pub auth_tokens: Vec<String>,

    /// Attach a permissive CORS layer
    #[arg(long, env = "CLAN_CORS", default_value_t = true, action = ArgAction::Set)]
    pub cors: bool,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "CLAN_MAX_BODY_BYTES", default_value_t = 1024 * 1024)]
    pub max_body_bytes: usize,

    /// How weekly merits are folded: sum, max or count
    #[arg(long, env = "CLAN_MERITS_AGGREGATION", default_value = "sum")]
    pub merits_aggregation: Aggregation,

    /// Log output format
    #[arg(long, env = "CLAN_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// JSON seed file loaded into the store at start
    #[arg(long, env = "CLAN_SEED")]
    pub seed: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    File(PathBuf),
}

fn parse_store(raw: &str) -> Result<StoreBackend, String> {
    match raw.trim() {
        "" => Err("store must be `memory` or a directory path".into()),
        "memory" => Ok(StoreBackend::Memory),
        dir => Ok(StoreBackend::File(PathBuf::from(dir))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Immutable application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_name: String,
    pub server: ServerConfig,
    pub store: StoreBackend,
    pub tenant: TenantId,
    pub store_deadline: Duration,
    pub auth_tokens: Vec<String>,
    pub merits_aggregation: Aggregation,
    pub log_format: LogFormat,
    pub seed: Option<PathBuf>,
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        Self {
            app_name: cli.app_name,
            server: ServerConfig {
                port: cli.port,
                host: cli.host,
                enable_cors: cli.cors,
                max_body_bytes: cli.max_body_bytes,
            },
            store: cli.store,
            tenant: TenantId::new(cli.tenant),
            store_deadline: Duration::from_millis(cli.store_deadline_ms),
            auth_tokens: cli.auth_tokens,
            merits_aggregation: cli.merits_aggregation,
            log_format: cli.log_format,
            seed: cli.seed,
        }
    }
}

impl AppConfig {
    pub fn series_config(&self) -> SeriesConfig {
        SeriesConfig::default().with_policy(MetricKind::Merits, self.merits_aggregation)
    }
}
