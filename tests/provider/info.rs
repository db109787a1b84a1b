use crate::common;
use esg_snapshot::{InfoBuilder, YfError};
use httpmock::Method::GET;

#[tokio::test]
async fn modules_are_merged_with_first_module_winning() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path(common::quote_summary_path("AAPL"))
            .query_param("modules", common::info_modules())
            .query_param("crumb", "crumb");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::info_body());
    });

    let client = common::preauth_client(&server);
    let info = InfoBuilder::new(&client, "AAPL").fetch().await.unwrap();
    mock.assert();

    // `price` precedes `quoteType` and `summaryDetail`
    assert_eq!(info.text("longName"), Some("Apple Inc."));
    assert_eq!(info.number("marketCap"), Some(3_785_304_392_000.0));

    assert_eq!(info.text("country"), Some("United States"));
    assert_eq!(info.number("beta"), Some(1.24));
    assert_eq!(info.number("52WeekChange"), Some(0.35123));
    assert_eq!(info.number("returnOnEquity"), Some(1.57413));
}

#[tokio::test]
async fn unknown_symbol_is_an_api_error() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path(common::quote_summary_path("INVALIDTICKER123"));
        then.status(404)
            .header("content-type", "application/json")
            .body(common::not_found_body());
    });

    let client = common::preauth_client(&server);
    let err = InfoBuilder::new(&client, "INVALIDTICKER123")
        .fetch()
        .await
        .unwrap_err();
    mock.assert();

    match err {
        YfError::Api(desc) => assert!(desc.contains("Quote not found")),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_without_envelope_is_a_status_error() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET).path(common::quote_summary_path("FAIL"));
        then.status(500).body("oops");
    });

    let client = common::preauth_client(&server);
    let err = InfoBuilder::new(&client, "FAIL").fetch().await.unwrap_err();

    match err {
        YfError::Status { status, url } => {
            assert_eq!(status, 500);
            assert!(url.contains("/v10/finance/quoteSummary/FAIL"));
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn result_without_info_modules_is_missing_data() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET).path(common::quote_summary_path("EMPTY"));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"quoteSummary":{"result":[{}],"error":null}}"#);
    });

    let client = common::preauth_client(&server);
    let err = InfoBuilder::new(&client, "EMPTY").fetch().await.unwrap_err();
    assert!(matches!(err, YfError::MissingData(_)), "got {err:?}");
}
