//! Serve command: run the MCP server on stdio.

use anyhow::Context;
use clap::Args;
use rmcp::{ServiceExt, transport::stdio};
use tracing::{info, instrument};

use pravka_core::config::Config;

use crate::server::PravkaServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    // Transport is always stdio; configuration comes from the global flags.
}

/// Start the MCP server and block until the client disconnects.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    _args: ServeArgs,
    max_input_bytes: Option<usize>,
    config: Config,
) -> anyhow::Result<()> {
    let dictionary = config
        .load_dictionary()
        .context("failed to load configured dictionary")?;
    info!(
        dictionary = dictionary.len(),
        max_input_bytes = ?max_input_bytes,
        "starting MCP server on stdio"
    );

    let server = PravkaServer::new()
        .with_dictionary(dictionary)
        .with_config(&config)
        .with_max_input_bytes(max_input_bytes);
    let service = server
        .serve(stdio())
        .await
        .context("failed to start MCP server")?;
    service.waiting().await.context("MCP server failed")?;

    info!("MCP server stopped");
    Ok(())
}
