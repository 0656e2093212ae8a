//! The `board` command pipeline end to end in demo mode.

use board_runtime::cli::Args;
use board_runtime::config::RuntimeConfig;
use board_runtime::wiring::{demo_owner, Board};
use board_runtime::execute;
use eb_01_request_list::{BoardError, RequestListApi};
use shared_types::{Address, RequestKind, RequestStatus};

/// Build, start and run `argv` against a fresh demo board.
async fn run(argv: &[&str]) -> (Board, anyhow::Result<String>) {
    let args = <Args as clap::Parser>::try_parse_from(argv).unwrap();
    let mut config = RuntimeConfig::default();
    config.apply_args(&args);
    config.validate().unwrap();

    let board = Board::from_config(&config).unwrap();
    board.start().await;
    let result = execute(&board, &args.command).await;
    (board, result)
}

#[tokio::test]
async fn test_demo_list_sorted_by_votes() {
    let (_, out) = run(&["board", "--demo", "list", "--sort", "votes:desc"]).await;
    let out = out.unwrap();
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[0], "Total 5 Integration Requests");
    assert!(lines[3].starts_with("IR-2"));
    assert!(lines[3].contains("The Graph indexing"));
    assert!(out.contains("sorted by votes desc"));
}

#[tokio::test]
async fn test_add_then_list_through_same_board() {
    let (board, out) = run(&[
        "board",
        "--demo",
        "add",
        "--kind",
        "issues",
        "--title",
        "Bridge stuck",
        "--description",
        "Withdrawals pending for hours",
    ])
    .await;
    assert!(out.unwrap().starts_with("confirmed 0x"));

    let view = board.controller(RequestKind::ProblemReport).view();
    assert_eq!(view.total_count, 4);
    let added = view
        .items
        .iter()
        .find(|r| r.title == "Bridge stuck")
        .unwrap();
    assert_eq!(added.id.to_string(), "PR-3");
    assert_eq!(added.status, RequestStatus::New);
}

#[tokio::test]
async fn test_enforced_owner_refuses_other_account() {
    let member = Address::from_low_u64_be(0x77).to_checksum();
    let (board, out) = run(&[
        "board",
        "--demo",
        "--from",
        member.as_str(),
        "--enforce-owner",
        "set-status",
        "IR-0",
        "done",
    ])
    .await;

    let err = out.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BoardError>(),
        Some(BoardError::Unauthorized { .. })
    ));
    let view = board.controller(RequestKind::Integration).view();
    let chainlink = view.items.iter().find(|r| r.id.index == 0).unwrap();
    assert_eq!(chainlink.status, RequestStatus::InReview);
}

#[tokio::test]
async fn test_owner_command_reports_demo_owner() {
    let (_, out) = run(&["board", "--demo", "owner"]).await;
    assert_eq!(out.unwrap(), demo_owner().to_checksum());
}

#[tokio::test]
async fn test_pending_flag_spans_both_lists() {
    let (board, _) = run(&["board", "--demo", "owner"]).await;
    let guard = board.pending.begin();

    for kind in RequestKind::ALL {
        assert!(board.controller(kind).view().transaction_pending);
    }
    drop(guard);
    for kind in RequestKind::ALL {
        assert!(!board.controller(kind).view().transaction_pending);
    }
}
