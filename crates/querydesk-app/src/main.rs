mod cli;
mod driver;
mod view;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use querydesk_common::{EventBus, QuerydeskError};
use querydesk_config::QuerydeskConfig;
use querydesk_remote::{HttpCollaborator, HttpConfig};
use querydesk_workflow::Coordinator;
use tracing_subscriber::EnvFilter;

/// Optional bearer token sent with every request.
const API_TOKEN_ENV: &str = "QUERYDESK_API_TOKEN";

fn init_logging(cli_directive: Option<&str>, config_directive: &str) {
    let filter = match cli_directive {
        Some(directive) => {
            EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(config_directive))
        }
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config_directive)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn http_config(config: &QuerydeskConfig) -> HttpConfig {
    let remote = &config.remote;
    let mut http = HttpConfig::new(remote.base_url.clone())
        .with_connect_timeout(Duration::from_secs(u64::from(remote.connect_timeout_secs)))
        .with_request_timeout(Duration::from_secs(u64::from(remote.request_timeout_secs)))
        .with_error_body_limit(remote.error_body_limit as usize);
    if let Ok(token) = std::env::var(API_TOKEN_ENV) {
        if !token.trim().is_empty() {
            http = http.with_auth_token(token.trim());
        }
    }
    http
}

async fn run(config: QuerydeskConfig) -> querydesk_common::Result<()> {
    let remote = HttpCollaborator::new(http_config(&config))
        .map_err(|e| QuerydeskError::Remote(e.to_string()))?;
    tracing::info!(server = %remote.config().base_url, "query service configured");

    let events = EventBus::new(256);
    let view = tokio::spawn(view::render_events(
        events.subscribe(),
        config.display.clone(),
    ));

    let coordinator = Coordinator::new(Arc::new(remote))
        .with_event_bus(events)
        .with_auto_fetch_schema(config.session.auto_fetch_schema);
    tracing::info!(session = %coordinator.id(), "session started");

    driver::Driver::new(coordinator, config.display).run().await?;

    // The driver owned the last sender; the view drains and exits.
    if let Err(e) = view.await {
        tracing::warn!("view task ended abnormally: {e}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    let loaded = match &args.config {
        Some(path) => querydesk_config::load_config_from(path),
        None => querydesk_config::load_config(),
    };
    let (mut config, load_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (QuerydeskConfig::default(), Some(e)),
    };

    init_logging(args.log_level.as_deref(), config.logging.level.directive());
    tracing::info!("querydesk v{} starting", env!("CARGO_PKG_VERSION"));

    if let Some(e) = load_error {
        tracing::warn!("Config load failed, using defaults: {e}");
        querydesk_config::apply_env_overrides(&mut config);
    }
    if let Some(server) = &args.server {
        querydesk_config::apply_server_url(&mut config, server);
    }

    if args.print_config {
        println!("{}", querydesk_config::config_to_json(&config));
        return ExitCode::SUCCESS;
    }

    match run(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("querydesk: {e}");
            ExitCode::FAILURE
        }
    }
}
