//! Serve command: run the MCP server on stdio.

use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use mitsudo_core::config::Config;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing::{info, instrument};

use super::{load_segmenter, open_word_store};
use crate::server::MitsudoServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    // No subcommand-specific arguments
}

/// Serve MCP over stdin/stdout until the client disconnects.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    _args: ServeArgs,
    max_input_bytes: Option<usize>,
    config: Config,
) -> anyhow::Result<()> {
    let options = config.analysis_options()?;
    let store = open_word_store(&config)?;
    let segmenter = load_segmenter()?;
    info!(word_list = %store.path(), "starting MCP server on stdio");

    let server = MitsudoServer::new(
        Arc::new(segmenter),
        Arc::new(store),
        options,
        max_input_bytes,
    );
    let service = server
        .serve(stdio())
        .await
        .context("failed to start MCP server")?;
    service.waiting().await.context("MCP server failed")?;

    info!("MCP server stopped");
    Ok(())
}
