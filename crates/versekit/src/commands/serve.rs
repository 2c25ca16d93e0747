//! Serve command: run the MCP server on stdio.

use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing::{info, instrument};

use versekit_core::{Config, Lexicon};

use crate::server::{ProjectServer, ServerDefaults};

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    // Transport is always stdio; settings come from config and global flags
}

/// Serve the lexicon over MCP until the client disconnects.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(_args: ServeArgs, config: Config, lexicon: Lexicon) -> anyhow::Result<()> {
    let defaults = ServerDefaults {
        syllable_mode: config.syllable_mode.unwrap_or_default(),
        rhyme_limit: config.rhyme_limit,
        max_input_bytes: config.input_limit(),
    };
    let stats = lexicon.stats();
    info!(
        dictionary = %stats.origin,
        words = stats.words,
        "starting MCP server on stdio"
    );

    let service = ProjectServer::new(Arc::new(lexicon), defaults)
        .serve(stdio())
        .await
        .context("failed to start MCP server")?;
    service
        .waiting()
        .await
        .context("MCP server terminated abnormally")?;

    info!("MCP server stopped");
    Ok(())
}
