//! Binary entry point: parse flags, load config, init logging, serve.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use bff_proxy::config::load_config;
use bff_proxy::observability::init_logging;
use bff_proxy::HttpServer;

#[derive(Debug, Parser)]
#[command(name = "bff-proxy", about = "Edge proxy fronting the GraphQL gateway")]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(long, short)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    init_logging(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        gateway_url = %config.upstream.gateway_url,
        client_api_gateway_url = %config.upstream.client_api_gateway_url,
        upstream_timeout_secs = config.upstream.request_timeout_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
