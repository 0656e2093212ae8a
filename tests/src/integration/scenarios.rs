//! # Request List Scenarios
//!
//! The controller reading and mutating the in-memory board contract:
//!
//! ```text
//! list ──▶ search ──▶ status filter ──▶ page ──▶ sort ──▶ view
//! upvote / set status ──▶ wait ──▶ list again
//! ```

use eb_01_request_list::{
    Column, PageSize, RefreshOutcome, RequestListApi, RowAction, SortDirection, StatusFilter,
};
use eb_02_contract_gateway::JournalEntry;
use shared_types::{RequestKind, RequestStatus, U256};

use super::Fixture;

fn ids(view: &eb_01_request_list::ListView) -> Vec<String> {
    view.items.iter().map(|r| r.id.to_string()).collect()
}

#[tokio::test]
async fn test_votes_descending_orders_page() {
    let fixture = Fixture::as_member();
    fixture.seed_alpha_beta();
    let controller = fixture.controller(RequestKind::Integration);

    assert_eq!(
        controller.refresh().await.unwrap(),
        RefreshOutcome::Applied { count: 2 }
    );
    controller.set_sort(Column::Votes, SortDirection::Descending);

    let view = controller.view();
    assert_eq!(ids(&view), vec!["IR-1", "IR-0"]);
    assert_eq!(view.items[0].votes, U256::from(5));
    assert_eq!(view.items[0].status, RequestStatus::Done);
    assert_eq!(view.items[1].votes, U256::from(2));
}

#[tokio::test]
async fn test_search_narrows_to_one_page() {
    let fixture = Fixture::as_member();
    fixture.seed_alpha_beta();
    let controller = fixture.controller(RequestKind::Integration);
    controller.refresh().await.unwrap();

    controller.set_search_text("alp");

    let view = controller.view();
    assert_eq!(ids(&view), vec!["IR-0"]);
    assert_eq!(view.filtered_count, 1);
    assert_eq!(view.page_count, 1);
    assert_eq!(view.total_count, 2);
}

#[tokio::test]
async fn test_upvote_reflects_contract_votes_after_refresh() {
    let fixture = Fixture::as_member();
    fixture.seed_alpha_beta();
    let controller = fixture.controller(RequestKind::Integration);
    controller.refresh().await.unwrap();
    fixture.contract.clear_journal();

    controller
        .perform_action(RowAction::Upvote, "IR-1")
        .await
        .unwrap();

    let journal = fixture.contract.journal();
    assert_eq!(
        journal[0],
        JournalEntry::Upvote {
            kind: RequestKind::Integration,
            index: 1
        }
    );
    assert!(matches!(journal[1], JournalEntry::Wait(_)));
    assert_eq!(journal[2], JournalEntry::List(RequestKind::Integration));

    let view = controller.view();
    let beta = view.items.iter().find(|r| r.id.index == 1).unwrap();
    assert_eq!(beta.votes, U256::from(6));
    assert!(!view.transaction_pending);
}

#[tokio::test]
async fn test_kinds_are_independent() {
    let fixture = Fixture::as_member();
    fixture.seed_alpha_beta();
    fixture.seed(RequestKind::ProblemReport, "Crash", RequestStatus::New, 0);

    let integrations = fixture.controller(RequestKind::Integration);
    let reports = fixture.controller(RequestKind::ProblemReport);
    integrations.refresh().await.unwrap();
    reports.refresh().await.unwrap();

    reports.perform_action(RowAction::Upvote, "PR-0").await.unwrap();

    assert_eq!(
        fixture.contract.records(RequestKind::ProblemReport)[0].votes,
        U256::one()
    );
    assert_eq!(ids(&reports.view()), vec!["PR-0"]);
    assert_eq!(integrations.view().total_count, 2);
}

#[tokio::test]
async fn test_submit_appears_after_confirmation() {
    let fixture = Fixture::as_member();
    let controller = fixture.controller(RequestKind::ProblemReport);
    controller.refresh().await.unwrap();

    controller
        .submit_request("  Explorer lag ", "Blocks show up late")
        .await
        .unwrap();

    let view = controller.view();
    assert_eq!(view.total_count, 1);
    assert_eq!(view.items[0].title, "Explorer lag");
    assert_eq!(view.items[0].status, RequestStatus::New);
    assert_eq!(view.items[0].id.to_string(), "PR-0");
}

#[tokio::test]
async fn test_status_filter_and_paging() {
    let fixture = Fixture::as_member();
    for i in 0..25 {
        let status = if i % 5 == 0 {
            RequestStatus::Hidden
        } else {
            RequestStatus::New
        };
        fixture.seed(RequestKind::Integration, &format!("Item {i}"), status, i);
    }
    let controller = fixture.controller(RequestKind::Integration);
    controller.refresh().await.unwrap();

    let view = controller.view();
    assert_eq!(view.page_count, 3);
    assert_eq!(view.items.len(), 10);

    controller.set_page(3);
    assert_eq!(controller.view().items.len(), 5);

    controller.set_status_filter(StatusFilter::only([RequestStatus::Hidden]));
    let view = controller.view();
    assert_eq!(view.page, 1);
    assert_eq!(view.filtered_count, 5);
    assert!(view.items.iter().all(|r| r.status == RequestStatus::Hidden));

    controller.set_status_filter(StatusFilter::All);
    controller.set_rows_per_page(PageSize::Twenty);
    let view = controller.view();
    assert_eq!(view.page_count, 2);
    assert_eq!(view.items.len(), 20);
}

#[tokio::test]
async fn test_owner_status_change_round_trip() {
    let fixture = Fixture::as_owner();
    fixture.seed_alpha_beta();
    let controller = fixture.controller(RequestKind::Integration);
    controller.refresh().await.unwrap();

    controller
        .perform_action(RowAction::SetStatus(RequestStatus::Rejected), "IR-0")
        .await
        .unwrap();

    let view = controller.view();
    let alpha = view.items.iter().find(|r| r.id.index == 0).unwrap();
    assert_eq!(alpha.status, RequestStatus::Rejected);
}
