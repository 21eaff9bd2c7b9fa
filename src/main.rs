use std::sync::Arc;
use anyhow::{ Context, Result };
use clap::Parser;
use log::{ debug, error, info };

use coderefine::{ build_router, AppState, ChatCompletionClient, EngineConfig, LLMCodeRelay };

mod cli;
use cli::{ ui, CodeRefineCli };

#[tokio::main]
async fn main() -> Result<()> {
    // Parse the command line arguments
    let cli = CodeRefineCli::parse();

    // Setup logging
    setup_logging(&cli.log_level);

    if let Err(e) = dotenv::dotenv() {
        debug!("No .env file loaded: {}", e);
    }

    let config = load_config(&cli).map_err(|e| {
        ui::print_error(&format!("{:#}", e));
        e
    })?;

    // Without a key the engine cannot serve anything, so refuse to start
    let api_key = config.get_api_key().map_err(|e| {
        error!("{}", e);
        ui::print_error(&format!("CRITICAL: {}", e));
        e
    })?;

    let client = ChatCompletionClient::new(&config, api_key)?;
    info!("Completion endpoint: {}", client.endpoint());
    let relay = LLMCodeRelay::new(Arc::new(client), &config);

    let state = AppState::new(Arc::new(relay.clone()), relay.model(), &config.server);
    let app = build_router(state, &config.server);

    let addr = config.server.bind_address()?;
    let listener = tokio::net::TcpListener
        ::bind(addr).await
        .with_context(|| format!("Failed to bind {}", addr))?;

    ui::print_banner(&addr.to_string(), relay.model());
    info!("CodeRefine engine listening on {}", addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    ui::print_info("Engine stopped.");
    Ok(())
}

/// Load the config file if given, then apply command-line overrides
fn load_config(cli: &CodeRefineCli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            EngineConfig::from_file(path).with_context(||
                format!("Failed to load configuration from {}", path.display())
            )?
        }
        None => EngineConfig::default(),
    };

    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(timeout) = cli.timeout_secs {
        config.timeout_secs = Some(timeout);
    }

    config.validate()?;
    Ok(config)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn setup_logging(log_level: &str) {
    // Set up the logger based on the log level
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder::new().filter_level(level).init();

    info!("Logger initialized with level: {}", log_level);
}
