//! Command-line interface.

use clap::{Args as ClapArgs, Parser, Subcommand};
use eb_01_request_list::{Column, PageSize, SortDescriptor, StatusFilter};
use shared_types::{Address, RequestKind, RequestStatus};

/// Ecosystem Board: integration requests and problem reports on chain
#[derive(Parser, Debug)]
#[command(name = "board")]
#[command(about = "List, vote on and triage ecosystem board requests")]
pub struct Args {
    /// JSON-RPC endpoint
    #[arg(long, env = "EB_RPC_URL", global = true)]
    pub rpc_url: Option<String>,

    /// Board contract address
    #[arg(long = "contract", env = "CONTRACT_ADDRESS", global = true)]
    pub contract: Option<Address>,

    /// Account to act as; skips wallet discovery
    #[arg(long, global = true)]
    pub from: Option<Address>,

    /// Run against an in-memory contract seeded with sample requests
    #[arg(long, global = true)]
    pub demo: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Log filter directive (overrides EB_LOG_LEVEL / RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Refuse status changes unless the account owns the contract
    #[arg(long, global = true)]
    pub enforce_owner: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show one page of requests
    List(ListArgs),

    /// Submit a new request
    Add {
        #[arg(long, default_value = "integrations")]
        kind: RequestKind,
        /// Short title
        #[arg(long)]
        title: String,
        /// Longer description
        #[arg(long)]
        description: String,
    },

    /// Upvote a request
    Upvote {
        #[arg(long, default_value = "integrations")]
        kind: RequestKind,
        /// Row id (`IR-3`) or bare index (`3`)
        id: String,
    },

    /// Change a request's status (contract owner only)
    SetStatus {
        #[arg(long, default_value = "integrations")]
        kind: RequestKind,
        /// Row id (`IR-3`) or bare index (`3`)
        id: String,
        /// Code (0-5), name (`in_review`) or label (`IN_REVIEW`)
        status: RequestStatus,
    },

    /// Print the contract owner
    Owner,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ListArgs {
    #[arg(long, default_value = "integrations")]
    pub kind: RequestKind,

    /// Case-insensitive title search
    #[arg(long, default_value = "")]
    pub search: String,

    /// `all` or a comma list of statuses
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,

    /// `column` or `column:asc|desc`
    #[arg(long)]
    pub sort: Option<SortDescriptor>,

    /// Rows per page: 10, 15 or 20
    #[arg(long, value_parser = parse_page_size)]
    pub rows: Option<PageSize>,

    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Comma list of visible columns
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<Column>,

    /// Print the view as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

fn parse_page_size(s: &str) -> Result<PageSize, String> {
    let rows: usize = s.parse().map_err(|_| format!("not a number: {s}"))?;
    PageSize::try_from(rows).map_err(|e| e.to_string())
}
