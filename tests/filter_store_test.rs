//! Remote filter-state operations driven through the console.
//!
//! Every operation follows the same pattern: one request, then either a full
//! navigation to the management view or an alert with the server's text and
//! an untouched page.

mod common;

use common::Harness;
use reqwest::StatusCode;
use triage::console::Outcome;
use triage::page::{Page, ValueInput};
use triage::remote::Endpoint;
use triage::types::{FilterMapping, FilterValue};

// ============================================================================
// Success path
// ============================================================================

#[tokio::test]
async fn test_reset_all_filters_navigates_to_manage() {
    let h = Harness::with_alerts();

    let outcome = h.console.reset_all_filters().await;

    assert_eq!(outcome, Outcome::Navigated("/ace/manage".to_string()));
    let requests = h.transport.requests_to(Endpoint::ResetFilters);
    assert_eq!(requests.len(), 1);
    assert!(requests[0].params.is_empty());
    assert!(h.notices.is_empty());
}

#[tokio::test]
async fn test_add_filter_sends_name_values_document() {
    let h = Harness::with_alerts();

    h.console
        .add_filter("Tag", vec![FilterValue::from("phish")])
        .await;

    let requests = h.transport.requests_to(Endpoint::AddFilter);
    insta::assert_snapshot!(
        requests[0].get("filter").unwrap(),
        @r#"{"name":"Tag","values":["phish"]}"#
    );
}

#[tokio::test]
async fn test_apply_filter_mapping_collects_panel_rows() {
    let h = Harness::new(Page::default());
    h.console.with_page(|page| {
        page.filter_panel
            .add_row_with_inputs("tag", vec![ValueInput::text("phish")]);
        page.filter_panel
            .add_row_with_inputs("tag", vec![ValueInput::text("malware")]);
    });

    let submit = h.console.apply_filter_mapping().await;

    assert!(submit.submission_suppressed);
    assert!(submit.outcome.is_navigation());
    let requests = h.transport.requests_to(Endpoint::SetFilters);
    insta::assert_snapshot!(
        requests[0].get("filters").unwrap(),
        @r#"{"tag":["phish","malware"]}"#
    );
}

#[tokio::test]
async fn test_apply_filter_mapping_with_compound_and_multi_select_rows() {
    let h = Harness::new(Page::default());
    h.console.with_page(|page| {
        page.filter_panel.add_row_with_inputs(
            "Observable",
            vec![ValueInput::text("ipv4"), ValueInput::text("10.0.0.1")],
        );
        page.filter_panel.add_row_with_inputs(
            "Disposition",
            vec![ValueInput::multi(["FALSE_POSITIVE", "IGNORE"])],
        );
    });

    h.console.apply_filter_mapping().await;

    let requests = h.transport.requests_to(Endpoint::SetFilters);
    insta::assert_snapshot!(
        requests[0].get("filters").unwrap(),
        @r#"{"Observable":[["ipv4","10.0.0.1"]],"Disposition":["FALSE_POSITIVE","IGNORE"]}"#
    );
}

#[tokio::test]
async fn test_apply_empty_panel_clears_server_filters() {
    let h = Harness::new(Page::default());

    let submit = h.console.apply_filter_mapping().await;

    assert!(submit.submission_suppressed);
    let requests = h.transport.requests_to(Endpoint::SetFilters);
    assert_eq!(requests[0].get("filters"), Some("{}"));
}

#[tokio::test]
async fn test_apply_prebuilt_mapping() {
    let h = Harness::new(Page::default());
    let mut mapping = FilterMapping::new();
    mapping.push("Queue", "external".into());

    h.console.apply_mapping(&mapping).await;

    let requests = h.transport.requests_to(Endpoint::SetFilters);
    assert_eq!(requests[0].get("filters"), Some(r#"{"Queue":["external"]}"#));
}

#[tokio::test]
async fn test_single_scalar_updates() {
    let h = Harness::new(Page::default());

    h.console.remove_filter("Tag", 1).await;
    h.console.remove_filter_category("Observable").await;
    h.console.set_sort_order("Alert Date").await;
    h.console.set_page_offset(150).await;
    h.console.set_page_size("50").await;

    let requests = h.transport.requests();
    let summary: Vec<(Endpoint, Vec<(String, String)>)> = requests
        .into_iter()
        .map(|r| (r.endpoint, r.params))
        .collect();
    let pairs = |p: &[(&str, &str)]| -> Vec<(String, String)> {
        p.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    };
    assert_eq!(
        summary,
        vec![
            (
                Endpoint::RemoveFilter,
                pairs(&[("name", "Tag"), ("index", "1")])
            ),
            (
                Endpoint::RemoveFilterCategory,
                pairs(&[("name", "Observable")])
            ),
            (Endpoint::SetSortFilter, pairs(&[("name", "Alert Date")])),
            (Endpoint::SetPageOffset, pairs(&[("offset", "150")])),
            (Endpoint::SetPageSize, pairs(&[("size", "50")])),
        ]
    );
}

#[tokio::test]
async fn test_custom_manage_path() {
    let transport = common::MockTransport::new();
    let notices = std::sync::Arc::new(triage::NoticeLog::new());
    let console = triage::Console::new(Page::default(), transport, notices)
        .with_manage_path("/console/manage");

    assert_eq!(
        console.reset_all_filters().await,
        Outcome::Navigated("/console/manage".to_string())
    );
    assert_eq!(console.location(), "/console/manage");
}

// ============================================================================
// Page size validation
// ============================================================================

#[tokio::test]
async fn test_page_size_rejected_locally() {
    for input in ["0", "1001", "abc"] {
        let h = Harness::new(Page::default());

        let outcome = h.console.set_page_size(input).await;

        assert!(matches!(outcome, Outcome::Rejected(_)), "{input}");
        assert_eq!(h.transport.traffic(), 0, "{input} must not be sent");
        assert_eq!(h.notices.len(), 1, "{input}");
        assert!(h.notices.messages()[0].contains("between 1 and 1000"));
    }
}

#[tokio::test]
async fn test_page_size_bounds_accepted() {
    for input in ["1", "1000"] {
        let h = Harness::new(Page::default());

        let outcome = h.console.set_page_size(input).await;

        assert!(outcome.is_navigation(), "{input}");
        let requests = h.transport.requests_to(Endpoint::SetPageSize);
        assert_eq!(requests[0].get("size"), Some(input));
    }
}

// ============================================================================
// Failure path
// ============================================================================

#[tokio::test]
async fn test_failure_shows_raw_text_and_keeps_page() {
    let h = Harness::with_alerts();
    h.check(&["uuid-2"]);
    h.console.with_page(|page| {
        page.filter_panel
            .add_row_with_inputs("Tag", vec![ValueInput::text("phish")]);
    });
    h.transport
        .fail("set_filters", StatusCode::BAD_REQUEST, "invalid filter: Tag");

    let submit = h.console.apply_filter_mapping().await;

    assert!(submit.submission_suppressed);
    assert_eq!(
        submit.outcome,
        Outcome::Failed("invalid filter: Tag".to_string())
    );
    assert_eq!(h.notices.messages(), vec!["invalid filter: Tag".to_string()]);
    h.console.with_page(|page| {
        assert_eq!(page.filter_panel.len(), 1);
        assert_eq!(page.selected_alert_ids().len(), 1);
    });
    // no retry
    assert_eq!(h.transport.requests_to(Endpoint::SetFilters).len(), 1);
}

#[tokio::test]
async fn test_failure_without_body_reports_status() {
    let h = Harness::new(Page::default());
    h.transport
        .fail("reset_filters", StatusCode::INTERNAL_SERVER_ERROR, "");

    let outcome = h.console.reset_all_filters().await;

    assert_eq!(
        outcome,
        Outcome::Failed("DOH: 500 Internal Server Error".to_string())
    );
    assert_eq!(h.console.location(), "/ace/manage");
}
