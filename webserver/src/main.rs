//! Profile extraction service entry point

use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;

use extractor::{
    Extractor, ExtractorConfig, HttpCompletionClient, KeyRegistry, DEFAULT_MIN_SUCCESS,
};
use shared::RequestConfig;
use webserver::{AppState, WebServer};

#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "HTTP surface for the profile extraction service")]
struct Args {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port for the HTTP server
    #[arg(long, default_value = "3000")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Successful workstreams required out of a full fan-out
    #[arg(long, default_value_t = DEFAULT_MIN_SUCCESS)]
    min_success: usize,

    /// Model override applied to every provider call
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; real deployments use the process environment
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    shared::logging::init_tracing(&args.log_level);

    let bind_address: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", args.host, args.port))?;

    let keys = KeyRegistry::from_env().context("loading provider API keys")?;
    let state = AppState::new(keys.providers(), keys.len());

    let client = HttpCompletionClient::new().context("building HTTP client")?;
    let config = ExtractorConfig {
        min_success: args.min_success,
        request: RequestConfig {
            model: args.model,
            ..RequestConfig::default()
        },
    };
    let engine = Extractor::new(client, keys, config);

    let server = WebServer::new(engine, state);
    server.run(bind_address).await?;

    Ok(())
}
