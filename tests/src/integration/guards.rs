//! Signer gating, the owner guard and failure handling against the
//! in-memory contract's journal.

use std::time::Duration;

use eb_01_request_list::{
    ActionOutcome, BoardError, ContractGateway, GatewayError, RefreshOutcome, RequestListApi, RequestListConfig,
    RowAction,
};
use eb_02_contract_gateway::{JournalEntry, LocalWalletSession};
use shared_types::{Address, RequestKind, RequestStatus, U256};

use super::{Fixture, MEMBER, OWNER};

fn guarded() -> RequestListConfig {
    RequestListConfig {
        enforce_owner_for_status: true,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_no_signer_reaches_nothing() {
    let fixture = Fixture::new(LocalWalletSession::read_only(Address::from_low_u64_be(
        MEMBER,
    )));
    fixture.seed_alpha_beta();
    let controller = fixture.controller(RequestKind::Integration);

    assert_eq!(controller.refresh().await.unwrap(), RefreshOutcome::Skipped);
    assert_eq!(
        controller
            .perform_action(RowAction::Upvote, "IR-1")
            .await
            .unwrap(),
        ActionOutcome::Declined
    );
    assert_eq!(
        controller
            .submit_request("Title", "Description")
            .await
            .unwrap(),
        ActionOutcome::Declined
    );

    assert!(fixture.contract.journal().is_empty());
    assert_eq!(controller.view().total_count, 0);
}

#[tokio::test]
async fn test_owner_guard_refuses_member() {
    let fixture = Fixture::as_member();
    fixture.seed_alpha_beta();
    let controller = fixture.controller_with(RequestKind::Integration, guarded());
    controller.refresh().await.unwrap();
    fixture.contract.clear_journal();

    let err = controller
        .perform_action(RowAction::SetStatus(RequestStatus::Done), "IR-0")
        .await
        .unwrap_err();

    match err {
        BoardError::Unauthorized { wallet, owner } => {
            assert_eq!(wallet, Some(Address::from_low_u64_be(MEMBER)));
            assert_eq!(owner, Address::from_low_u64_be(OWNER));
        }
        other => panic!("expected Unauthorized, got {other:?}"),
    }
    assert_eq!(fixture.contract.journal(), vec![JournalEntry::Owner]);
    assert_eq!(fixture.contract.mutation_count(), 0);
}

#[tokio::test]
async fn test_owner_guard_ignores_address_case() {
    let owner: Address = "0x00000000000000000000000000000000abcdef12".parse().unwrap();
    let wallet: Address = "0x00000000000000000000000000000000ABCDEF12".parse().unwrap();
    let fixture = Fixture::owned_by(owner, LocalWalletSession::new(wallet));
    fixture.seed(RequestKind::ProblemReport, "Bug", RequestStatus::New, 0);
    assert_eq!(fixture.contract.owner_address().await.unwrap(), owner);

    let controller = fixture.controller_with(RequestKind::ProblemReport, guarded());
    controller.refresh().await.unwrap();

    let outcome = controller
        .perform_action(RowAction::SetStatus(RequestStatus::InReview), "PR-0")
        .await
        .unwrap();

    assert!(matches!(outcome, ActionOutcome::Confirmed(_)));
    assert_eq!(controller.view().items[0].status, RequestStatus::InReview);
}

#[tokio::test]
async fn test_unguarded_member_sees_contract_revert() {
    let fixture = Fixture::as_member();
    fixture.seed_alpha_beta();
    let controller = fixture.controller(RequestKind::Integration);
    controller.refresh().await.unwrap();

    let err = controller
        .perform_action(RowAction::SetStatus(RequestStatus::Done), "IR-0")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BoardError::Gateway(GatewayError::Reverted { ref reason }) if reason == "Only owner"
    ));
    assert!(controller.last_error().is_some());
    assert_eq!(controller.view().items.len(), 2);
}

#[tokio::test]
async fn test_gateway_failure_keeps_collection() {
    let fixture = Fixture::as_member();
    fixture.seed_alpha_beta();
    let controller = fixture.controller(RequestKind::Integration);
    controller.refresh().await.unwrap();

    fixture.contract.fail_next_list("node unreachable");
    assert!(controller.refresh().await.is_err());
    assert_eq!(controller.view().total_count, 2);

    fixture.contract.fail_next_call("nonce too low");
    let err = controller
        .perform_action(RowAction::Upvote, "IR-0")
        .await
        .unwrap_err();
    assert!(matches!(err, BoardError::Gateway(GatewayError::Injected(_))));
    assert_eq!(controller.view().total_count, 2);
    assert!(!controller.view().transaction_pending);
    assert_eq!(fixture.contract.records(RequestKind::Integration)[0].votes, U256::from(2));
}

#[tokio::test]
async fn test_malformed_id_sends_nothing() {
    let fixture = Fixture::as_member();
    fixture.seed_alpha_beta();
    let controller = fixture.controller(RequestKind::Integration);
    controller.refresh().await.unwrap();
    fixture.contract.clear_journal();

    let err = controller
        .perform_action(RowAction::Upvote, "PR-1")
        .await
        .unwrap_err();

    assert!(matches!(err, BoardError::MalformedId { .. }));
    assert!(fixture.contract.journal().is_empty());
}

#[tokio::test]
async fn test_slow_refresh_does_not_overwrite_newer() {
    let fixture = Fixture::as_member();
    fixture.seed_alpha_beta();
    let controller = fixture.controller(RequestKind::Integration);

    fixture.contract.delay_next_list(Duration::from_millis(80));
    let slow = controller.refresh();
    let fast = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        fixture.seed(RequestKind::Integration, "Gamma", RequestStatus::New, 0);
        controller.refresh().await
    };
    let (slow, fast) = tokio::join!(slow, fast);

    assert_eq!(slow.unwrap(), RefreshOutcome::Stale);
    assert_eq!(fast.unwrap(), RefreshOutcome::Applied { count: 3 });
    assert_eq!(controller.view().total_count, 3);
}

#[tokio::test]
async fn test_connect_transition_loads_list() {
    let fixture = Fixture::new(LocalWalletSession::disconnected(
        Address::from_low_u64_be(MEMBER),
    ));
    fixture.seed_alpha_beta();
    let controller = fixture.controller(RequestKind::Integration);
    controller.on_connection_changed(false).await.unwrap();
    assert_eq!(controller.view().total_count, 0);

    let outcome = controller.connect().await.unwrap();

    assert_eq!(outcome, Some(RefreshOutcome::Applied { count: 2 }));
    assert_eq!(controller.view().total_count, 2);
}
