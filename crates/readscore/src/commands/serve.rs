//! Serve command: run the MCP server on stdio.

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing::{debug, instrument};

use readscore_core::Config;

use super::scorer_for;
use crate::server::ReadscoreServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Serve scoring tools over MCP until the client disconnects.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    _args: ServeArgs,
    max_input_bytes: Option<usize>,
    config: Config,
) -> anyhow::Result<()> {
    let scorer = scorer_for(&config)?;
    let server = ReadscoreServer::new(scorer, config.score_config(), max_input_bytes);
    debug!(?max_input_bytes, "starting MCP server on stdio");

    let service = server
        .serve(stdio())
        .await
        .context("failed to start MCP server")?;
    service.waiting().await.context("MCP server stopped")?;
    Ok(())
}
