use std::sync::Arc;
use std::time::Duration;

use hrm_console::domain::types::ActiveStatus;
use hrm_console::dto::envelope::ResponseEnvelope;
use hrm_console::dto::query::QueryOverrides;
use hrm_console::repository::errors::GatewayError;
use hrm_console::services::ServiceError;
use hrm_console::services::list::FetchOutcome;

mod common;

use common::{ScriptedGateway, company, company_screen, page_envelope, wait_for_reads};

async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_initialize_loads_rows_and_page_count() {
    let gateway = ScriptedGateway::new();
    gateway.push_read(Ok(page_envelope(
        &[company("c-1", "Acme"), company("c-2", "Globex")],
        1,
        10,
        2,
    )));
    let (controller, _) = company_screen(&gateway, &[("Create_Company", true)]);

    assert_eq!(controller.initialize().await, FetchOutcome::Applied);

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.rows, vec![company("c-1", "Acme"), company("c-2", "Globex")]);
    assert_eq!(snapshot.page.total_count, 2);
    assert_eq!(snapshot.page.total_pages, 1);
    assert!(snapshot.access.is_create);
    assert!(!snapshot.access.is_edit);
    assert!(!snapshot.access.is_delete);
    assert_eq!(snapshot.page_sizes, vec![10, 50, 75, 100]);

    let reads = gateway.reads();
    assert_eq!(reads.len(), 1);
    assert_eq!(reads[0].search_query, "");
    assert_eq!(reads[0].page_no, Some(1));
    assert_eq!(reads[0].page_size, Some(10));
}

#[tokio::test]
async fn test_rejected_read_clears_rows_and_keeps_counts() {
    let gateway = ScriptedGateway::new();
    gateway.push_read(Ok(page_envelope(&[company("c-1", "Acme")], 1, 10, 12)));
    gateway.push_read(Ok(ResponseEnvelope::rejected("x")));
    let (controller, _) = company_screen(&gateway, &[]);

    controller.initialize().await;
    let outcome = controller.fetch(QueryOverrides::new()).await;

    assert_eq!(outcome, FetchOutcome::Failed);
    let snapshot = controller.snapshot();
    assert!(snapshot.rows.is_empty());
    assert_eq!(snapshot.page.total_count, 12);
    assert_eq!(snapshot.page.total_pages, 2);
}

#[tokio::test]
async fn test_change_page_out_of_range_does_not_fetch() {
    let gateway = ScriptedGateway::new();
    gateway.push_read(Ok(page_envelope(&[company("c-1", "Acme")], 1, 10, 30)));
    gateway.push_read(Ok(page_envelope(&[company("c-11", "Umbrella")], 2, 10, 30)));
    let (controller, _) = company_screen(&gateway, &[]);
    controller.initialize().await;

    assert_eq!(controller.change_page(0).await, FetchOutcome::Skipped);
    assert_eq!(controller.change_page(4).await, FetchOutcome::Skipped);
    assert_eq!(gateway.read_count(), 1);

    assert_eq!(controller.change_page(2).await, FetchOutcome::Applied);
    let reads = gateway.reads();
    assert_eq!(reads.len(), 2);
    assert_eq!(reads[1].page_no, Some(2));
    assert_eq!(controller.snapshot().page.page_no, 2);
    assert_eq!(controller.snapshot().rows, vec![company("c-11", "Umbrella")]);
}

#[tokio::test]
async fn test_change_page_size_resets_to_first_page() {
    let gateway = ScriptedGateway::new();
    gateway.push_read(Ok(page_envelope(&[], 1, 10, 120)));
    gateway.push_read(Ok(page_envelope(&[], 3, 10, 120)));
    gateway.push_read(Ok(page_envelope(&[], 1, 50, 120)));
    let (controller, _) = company_screen(&gateway, &[]);
    controller.initialize().await;
    controller.change_page(3).await;

    assert_eq!(controller.change_page_size(50).await, FetchOutcome::Applied);

    let reads = gateway.reads();
    assert_eq!(reads[2].page_no, Some(1));
    assert_eq!(reads[2].page_size, Some(50));
    let page = controller.snapshot().page;
    assert_eq!(page.page_no, 1);
    assert_eq!(page.page_size, 50);
    assert_eq!(page.total_pages, 3);
}

#[tokio::test]
async fn test_status_filter_keeps_search_term() {
    let gateway = ScriptedGateway::new();
    let (controller, _) = company_screen(&gateway, &[]);
    controller.initialize().await;
    controller.search_now("acme").await;

    controller
        .change_status_filter(Some(ActiveStatus::Active))
        .await;

    let reads = gateway.reads();
    let last = reads.last().expect("status fetch");
    assert_eq!(last.search_query, "acme");
    assert_eq!(last.active_status, Some(ActiveStatus::Active));
    assert_eq!(last.page_no, Some(1));
}

#[tokio::test(start_paused = true)]
async fn test_search_burst_sends_one_request() {
    let gateway = ScriptedGateway::new();
    let (controller, _) = company_screen(&gateway, &[]);

    controller.search("a");
    tokio::time::sleep(Duration::from_millis(100)).await;
    controller.search("ab");
    tokio::time::sleep(Duration::from_millis(100)).await;
    controller.search("abc");
    assert_eq!(controller.snapshot().search_term, "abc");
    assert_eq!(gateway.read_count(), 0);

    tokio::time::sleep(Duration::from_millis(600)).await;
    settle().await;

    let reads = gateway.reads();
    assert_eq!(reads.len(), 1);
    assert_eq!(reads[0].search_query, "abc");
    assert_eq!(reads[0].page_no, Some(1));
}

#[tokio::test(start_paused = true)]
async fn test_search_after_quiet_period_sends_again() {
    let gateway = ScriptedGateway::new();
    let (controller, _) = company_screen(&gateway, &[]);

    controller.search("ac");
    tokio::time::sleep(Duration::from_millis(700)).await;
    settle().await;
    controller.search("acme");
    tokio::time::sleep(Duration::from_millis(700)).await;
    settle().await;

    let terms: Vec<String> = gateway.reads().into_iter().map(|p| p.search_query).collect();
    assert_eq!(terms, vec!["ac".to_string(), "acme".to_string()]);
}

#[tokio::test]
async fn test_failed_status_filter_leaves_first_page_selected() {
    let gateway = ScriptedGateway::new();
    gateway.push_read(Ok(page_envelope(&[], 1, 10, 30)));
    gateway.push_read(Ok(page_envelope(&[company("c-11", "Umbrella")], 2, 10, 30)));
    gateway.push_read(Ok(ResponseEnvelope::rejected("x")));
    let (controller, _) = company_screen(&gateway, &[]);
    controller.initialize().await;
    controller.change_page(2).await;

    let outcome = controller
        .change_status_filter(Some(ActiveStatus::Inactive))
        .await;

    assert_eq!(outcome, FetchOutcome::Failed);
    assert_eq!(gateway.reads()[2].page_no, Some(1));
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.page.page_no, 1);
    assert_eq!(snapshot.page.total_count, 30);
}

#[tokio::test(start_paused = true)]
async fn test_failed_debounced_search_leaves_first_page_selected() {
    let gateway = ScriptedGateway::new();
    gateway.push_read(Ok(page_envelope(&[], 1, 10, 30)));
    gateway.push_read(Ok(page_envelope(&[], 3, 10, 30)));
    gateway.push_read(Err(GatewayError::Network("offline".to_string())));
    let (controller, _) = company_screen(&gateway, &[]);
    controller.initialize().await;
    controller.change_page(3).await;

    controller.search("umb");
    tokio::time::sleep(Duration::from_millis(600)).await;
    wait_for_reads(&gateway, 3).await;
    settle().await;

    assert_eq!(gateway.reads()[2].page_no, Some(1));
    assert_eq!(controller.snapshot().page.page_no, 1);
    assert!(controller.snapshot().rows.is_empty());
}

#[tokio::test]
async fn test_latest_request_wins_when_responses_arrive_out_of_order() {
    let gateway = ScriptedGateway::new();
    let first = gateway.push_gated_read();
    let second = gateway.push_gated_read();
    let (controller, _) = company_screen(&gateway, &[]);
    let controller = Arc::new(controller);

    let a = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.fetch(QueryOverrides::new().search("a")).await }
    });
    wait_for_reads(&gateway, 1).await;
    let b = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.fetch(QueryOverrides::new().search("b")).await }
    });
    wait_for_reads(&gateway, 2).await;

    second
        .send(Ok(page_envelope(&[company("c-b", "Bravo")], 1, 10, 1)))
        .expect("b pending");
    assert_eq!(b.await.expect("b joined"), FetchOutcome::Applied);

    first
        .send(Ok(page_envelope(&[company("c-a", "Alpha")], 1, 10, 1)))
        .expect("a pending");
    assert_eq!(a.await.expect("a joined"), FetchOutcome::Stale);

    assert_eq!(controller.snapshot().rows, vec![company("c-b", "Bravo")]);
}

#[tokio::test]
async fn test_teardown_discards_in_flight_response() {
    let gateway = ScriptedGateway::new();
    gateway.push_read(Ok(page_envelope(&[company("c-1", "Acme")], 1, 10, 1)));
    let gate = gateway.push_gated_read();
    let (controller, _) = company_screen(&gateway, &[]);
    let controller = Arc::new(controller);
    controller.initialize().await;
    let before = controller.snapshot();

    let pending = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.fetch(QueryOverrides::new()).await }
    });
    wait_for_reads(&gateway, 2).await;

    controller.teardown();
    let _ = gate.send(Ok(page_envelope(&[company("c-9", "Late")], 1, 10, 9)));

    assert_eq!(pending.await.expect("joined"), FetchOutcome::Cancelled);
    assert_eq!(controller.snapshot(), before);
    assert_eq!(controller.fetch(QueryOverrides::new()).await, FetchOutcome::Cancelled);
    assert_eq!(gateway.read_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_teardown_cancels_pending_search() {
    let gateway = ScriptedGateway::new();
    let (controller, _) = company_screen(&gateway, &[]);

    controller.search("acme");
    tokio::time::sleep(Duration::from_millis(100)).await;
    controller.teardown();
    tokio::time::sleep(Duration::from_millis(1000)).await;
    settle().await;

    assert_eq!(gateway.read_count(), 0);
    assert!(controller.is_torn_down());
}

#[tokio::test]
async fn test_delete_removes_matching_rows_only() {
    let gateway = ScriptedGateway::new();
    gateway.push_read(Ok(page_envelope(
        &[company("c-1", "Acme"), company("c-2", "Globex"), company("c-3", "Initech")],
        1,
        10,
        3,
    )));
    let (controller, _) = company_screen(&gateway, &[("Delete_Company", true)]);
    controller.initialize().await;

    let removed = controller.delete_row("c-2").await.expect("deleted");

    assert_eq!(removed, 1);
    assert_eq!(gateway.deleted(), vec!["c-2".to_string()]);
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.rows, vec![company("c-1", "Acme"), company("c-3", "Initech")]);
    assert_eq!(snapshot.page.total_count, 3);
}

#[tokio::test]
async fn test_failed_delete_leaves_rows_identical() {
    let gateway = ScriptedGateway::new();
    gateway.push_read(Ok(page_envelope(&[company("c-1", "Acme"), company("c-2", "Globex")], 1, 10, 2)));
    gateway.push_delete(Ok(ResponseEnvelope::rejected("company has employees")));
    gateway.push_delete(Err(GatewayError::Network("connection reset".to_string())));
    let (controller, _) = company_screen(&gateway, &[("Delete_Company", true)]);
    controller.initialize().await;
    let before = controller.snapshot();

    let rejected = controller.delete_row("c-1").await;
    let failed = controller.delete_row("c-1").await;

    assert!(matches!(rejected, Err(ServiceError::Rejected(ref m)) if m == "company has employees"));
    assert!(matches!(failed, Err(ServiceError::Gateway(GatewayError::Network(_)))));
    assert_eq!(controller.snapshot(), before);
}

#[tokio::test]
async fn test_delete_without_permission_is_refused() {
    let gateway = ScriptedGateway::new();
    let (controller, _) = company_screen(&gateway, &[("Delete_Company", false)]);
    controller.initialize().await;

    let result = controller.delete_row("c-1").await;

    assert!(matches!(result, Err(ServiceError::Unauthorized)));
    assert!(gateway.deleted().is_empty());
}

#[tokio::test]
async fn test_export_receives_current_rows() {
    let gateway = ScriptedGateway::new();
    gateway.push_read(Ok(page_envelope(&[company("c-1", "Acme")], 1, 10, 1)));
    let (controller, sink) = company_screen(&gateway, &[]);
    controller.initialize().await;
    let reads_before = gateway.read_count();

    controller.export_current_view("json");

    let exports = sink.exports.lock().unwrap();
    assert_eq!(exports.len(), 1);
    assert_eq!(exports[0].0, "json");
    assert_eq!(exports[0].1.len(), 1);
    assert_eq!(exports[0].1[0]["companyId"], "c-1");
    assert_eq!(gateway.read_count(), reads_before);
}

#[tokio::test]
async fn test_filters_are_sent_until_cleared() {
    let gateway = ScriptedGateway::new();
    let (controller, _) = company_screen(&gateway, &[]);

    controller.set_filter("industryId", "ind-7");
    controller.fetch(QueryOverrides::new()).await;
    controller.clear_filter("industryId");
    controller.fetch(QueryOverrides::new()).await;

    let reads = gateway.reads();
    assert_eq!(reads[0].filters.get("industryId").map(String::as_str), Some("ind-7"));
    assert!(reads[1].filters.is_empty());
}
