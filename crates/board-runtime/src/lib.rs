//! # Ecosystem Board Runtime
//!
//! Library half of the `board` binary: CLI definition, configuration,
//! wiring and rendering. `main.rs` only sequences them.
//!
//! ## Startup Sequence
//!
//! 1. Parse arguments
//! 2. Load configuration (env, then flags) and validate
//! 3. Initialize logging
//! 4. Wire gateway, wallet and controllers
//! 5. Connect the wallet and load both lists
//! 6. Run the command

pub mod cli;
pub mod config;
pub mod render;
pub mod wiring;

use anyhow::{bail, Context, Result};
use eb_01_request_list::{ActionOutcome, RequestListApi, RowAction, Selection};
use tracing::info;

use crate::cli::{Command, ListArgs};
use crate::wiring::Board;

/// Apply list flags to the controller and render its view.
pub fn list(board: &Board, args: &ListArgs) -> Result<String> {
    let controller = board.controller(args.kind);
    controller.set_search_text(&args.search);
    controller.set_status_filter(args.status.clone());
    if let Some(sort) = args.sort {
        controller.set_sort(sort.column, sort.direction);
    }
    if let Some(rows) = args.rows {
        controller.set_rows_per_page(rows);
    }
    if !args.columns.is_empty() {
        controller.set_visible_columns(args.columns.iter().copied().collect());
    }
    controller.set_selection(Selection::default());
    controller.set_page(args.page);

    let view = controller.view();
    if args.json {
        return serde_json::to_string_pretty(&view).context("serializing view");
    }
    Ok(render::render_table(&view))
}

fn describe(outcome: ActionOutcome) -> Result<String> {
    match outcome {
        ActionOutcome::Confirmed(hash) => Ok(format!("confirmed {hash}")),
        ActionOutcome::Declined => bail!("no signer available; connect a wallet or pass --from"),
    }
}

/// Run one command against a started board.
pub async fn execute(board: &Board, command: &Command) -> Result<String> {
    match command {
        Command::List(args) => list(board, args),
        Command::Add {
            kind,
            title,
            description,
        } => {
            let outcome = board
                .controller(*kind)
                .submit_request(title, description)
                .await
                .context("submitting request")?;
            describe(outcome)
        }
        Command::Upvote { kind, id } => {
            let outcome = board
                .controller(*kind)
                .perform_action(RowAction::Upvote, id)
                .await
                .with_context(|| format!("upvoting {id}"))?;
            describe(outcome)
        }
        Command::SetStatus { kind, id, status } => {
            let outcome = board
                .controller(*kind)
                .perform_action(RowAction::SetStatus(*status), id)
                .await
                .with_context(|| format!("setting {id} to {status}"))?;
            describe(outcome)
        }
        Command::Owner => {
            let owner = board
                .gateway
                .owner_address()
                .await
                .context("reading contract owner")?;
            info!(owner = %owner, "Contract owner");
            Ok(owner.to_checksum())
        }
    }
}
