use crate::common;
use esg_snapshot::InfoBuilder;
use httpmock::Method::GET;

#[tokio::test]
async fn first_request_fetches_cookie_and_crumb() {
    let server = common::setup_server();
    let (cookie_mock, crumb_mock) = common::mock_cookie_crumb(&server);

    let api = server.mock(|when, then| {
        when.method(GET)
            .path(common::quote_summary_path("AAPL"))
            .query_param("modules", common::info_modules())
            .query_param("crumb", "crumb-value");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::info_body());
    });

    let client = common::client_for(&server).build().unwrap();

    let info = InfoBuilder::new(&client, "AAPL").fetch().await.unwrap();
    cookie_mock.assert();
    crumb_mock.assert();
    api.assert();
    assert_eq!(info.text("longName"), Some("Apple Inc."));

    // credentials are reused by the next call
    InfoBuilder::new(&client, "AAPL").fetch().await.unwrap();
    cookie_mock.assert_hits(1);
    crumb_mock.assert_hits(1);
    api.assert_hits(2);
}

#[tokio::test]
async fn invalid_crumb_is_refreshed_once() {
    let server = common::setup_server();
    let client = common::client_for(&server)
        ._preauth("cookie", "stale-crumb")
        .build()
        .unwrap();

    let invalid = server.mock(|when, then| {
        when.method(GET)
            .path(common::quote_summary_path("AAPL"))
            .query_param("crumb", "stale-crumb");
        then.status(401)
            .header("content-type", "application/json")
            .body(r#"{"quoteSummary":{"result":null,"error":{"code":"Unauthorized","description":"Invalid Crumb"}}}"#);
    });

    let (cookie_mock, crumb_mock) = common::mock_cookie_crumb(&server);

    let ok = server.mock(|when, then| {
        when.method(GET)
            .path(common::quote_summary_path("AAPL"))
            .query_param("crumb", "crumb-value");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::info_body());
    });

    let info = InfoBuilder::new(&client, "AAPL").fetch().await.unwrap();
    invalid.assert();
    cookie_mock.assert();
    crumb_mock.assert();
    ok.assert();
    assert_eq!(info.text("currency"), Some("USD"));
}

#[tokio::test]
async fn html_crumb_is_an_auth_error() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/consent");
        then.status(404).header("set-cookie", "A=B; Path=/");
    });
    server.mock(|when, then| {
        when.method(GET).path("/v1/test/getcrumb");
        then.status(200).body("<html>blocked</html>");
    });

    let client = common::client_for(&server).build().unwrap();
    let err = InfoBuilder::new(&client, "AAPL").fetch().await.unwrap_err();
    assert!(
        matches!(err, esg_snapshot::YfError::Auth(_)),
        "expected Auth error, got {err:?}"
    );
}
