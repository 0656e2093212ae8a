//! # Ecosystem Board CLI
//!
//! ```text
//! board --demo list --sort votes:desc
//! board --from 0x... upvote --kind issues PR-3
//! board set-status IR-2 done --enforce-owner
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use board_runtime::cli::Args;
use board_runtime::config::RuntimeConfig;
use board_runtime::wiring::Board;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = RuntimeConfig::load(&args).context("loading configuration")?;
    eb_telemetry::init_logging(&config.telemetry).context("initializing logging")?;
    info!(
        service = %config.telemetry.service_name,
        demo = config.demo,
        "Starting board"
    );

    let board = Board::from_config(&config)?;
    board.start().await;

    let result = board_runtime::execute(&board, &args.command).await;
    board.shutdown();

    println!("{}", result?);
    Ok(())
}
