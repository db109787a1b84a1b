use crate::common;
use esg_snapshot::build_record;
use httpmock::Method::GET;

#[tokio::test]
async fn record_is_built_from_live_shaped_responses() {
    let server = common::setup_server();
    let info = server.mock(|when, then| {
        when.method(GET)
            .path(common::quote_summary_path("AAPL"))
            .query_param("modules", common::info_modules());
        then.status(200)
            .header("content-type", "application/json")
            .body(common::info_body());
    });
    let esg = server.mock(|when, then| {
        when.method(GET)
            .path(common::quote_summary_path("AAPL"))
            .query_param("modules", "esgScores");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::esg_body());
    });
    let financials = server.mock(|when, then| {
        when.method(GET)
            .path("/ws/fundamentals-timeseries/v1/finance/timeseries/AAPL");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::timeseries_body());
    });
    let chart = server.mock(|when, then| {
        when.method(GET).path("/v8/finance/chart/AAPL");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::chart_body(
                &[1_735_516_800, 1_735_603_200],
                &[252.2, 250.42],
            ));
    });

    let client = common::preauth_client(&server);
    let rec = build_record(&client, "AAPL", common::d(2024, 12, 31)).await;
    info.assert();
    esg.assert();
    financials.assert();
    chart.assert();

    assert_eq!(rec.status, "Success");
    assert_eq!(rec.company_name.as_deref(), Some("Apple Inc."));
    assert_eq!(rec.currency.as_deref(), Some("USD"));
    assert_eq!(rec.data_date, "2024-12-31");
    assert_eq!(rec.total_esg_score, Some(18.81));
    assert_eq!(rec.esg_performance.as_deref(), Some("UNDER_PERF"));
    assert_eq!(rec.stock_price, Some(250.42));
    assert_eq!(rec.current_price, Some(250.42));
    assert_eq!(rec.pe_ratio, Some(41.23));
    assert_eq!(rec.pb_ratio, Some(66.4));
    assert_eq!(rec.annual_return_pct, Some(35.12));
    assert_eq!(rec.roe_pct, Some(157.41));
    assert_eq!(rec.ebitda_margin_pct, Some(34.44));
    assert_eq!(rec.beta, Some(1.24));
    assert_eq!(rec.debt_to_equity, Some(209.06));
    assert_eq!(rec.current_ratio, Some(0.87));
    assert_eq!(rec.revenue_growth_pct, Some(2.02));
}

#[tokio::test]
async fn failing_optional_parts_only_null_their_fields() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET)
            .path(common::quote_summary_path("NESN.SW"))
            .query_param("modules", common::info_modules());
        then.status(200)
            .header("content-type", "application/json")
            .body(common::info_body());
    });
    server.mock(|when, then| {
        when.method(GET)
            .path(common::quote_summary_path("NESN.SW"))
            .query_param("modules", "esgScores");
        then.status(404)
            .header("content-type", "application/json")
            .body(common::not_found_body());
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/ws/fundamentals-timeseries/v1/finance/timeseries/NESN.SW");
        then.status(500).body("oops");
    });
    server.mock(|when, then| {
        when.method(GET).path("/v8/finance/chart/NESN.SW");
        then.status(500).body("oops");
    });

    let client = common::preauth_client(&server);
    let rec = build_record(&client, "NESN.SW", common::d(2024, 12, 31)).await;

    assert_eq!(rec.status, "Success");
    assert_eq!(rec.total_esg_score, None);
    assert_eq!(rec.esg_performance, None);
    assert_eq!(rec.stock_price, None);
    assert_eq!(rec.revenue_growth_pct, None);
    assert_eq!(rec.beta, Some(1.24));
}

#[tokio::test]
async fn unknown_symbol_becomes_an_error_record() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET)
            .path(common::quote_summary_path("INVALIDTICKER123"));
        then.status(404)
            .header("content-type", "application/json")
            .body(common::not_found_body());
    });

    let client = common::preauth_client(&server);
    let rec = build_record(&client, "INVALIDTICKER123", common::d(2024, 12, 31)).await;

    assert_eq!(rec.ticker, "INVALIDTICKER123");
    assert_eq!(rec.data_date, "2024-12-31");
    assert!(rec.status.starts_with("Error: "), "{}", rec.status);
    assert!(rec.status.contains("Quote not found"));
    assert_eq!(rec.company_name, None);
    assert_eq!(rec.market_cap, None);
}

#[tokio::test]
async fn sustainability_outage_becomes_an_error_record() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET)
            .path(common::quote_summary_path("AAPL"))
            .query_param("modules", common::info_modules());
        then.status(200)
            .header("content-type", "application/json")
            .body(common::info_body());
    });
    let esg = server.mock(|when, then| {
        when.method(GET)
            .path(common::quote_summary_path("AAPL"))
            .query_param("modules", "esgScores");
        then.status(503).body("Service Unavailable");
    });

    let client = common::preauth_client(&server);
    let rec = build_record(&client, "AAPL", common::d(2024, 12, 31)).await;
    esg.assert();

    assert!(rec.status.starts_with("Error: "), "{}", rec.status);
    assert!(rec.status.contains("503"), "{}", rec.status);
    assert_eq!(rec.company_name, None);
    assert_eq!(rec.beta, None);
    assert_eq!(rec.data_date, "2024-12-31");
}

#[tokio::test]
async fn error_status_does_not_leak_the_session_crumb() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET).path(common::quote_summary_path("AAPL"));
        then.status(500).body("oops");
    });

    let client = common::preauth_client(&server);
    let rec = build_record(&client, "AAPL", common::d(2024, 12, 31)).await;

    assert!(rec.status.starts_with("Error: "), "{}", rec.status);
    assert!(rec.status.contains("/v10/finance/quoteSummary/AAPL"), "{}", rec.status);
    assert!(!rec.status.contains("crumb="), "{}", rec.status);
}
