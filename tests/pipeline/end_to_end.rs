use crate::common::{self, FakeProvider, RecordingProgress};
use esg_snapshot::pipeline;

fn tickers(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn valid_and_invalid_tickers_both_yield_records() {
    let provider = FakeProvider::new().with("AAPL", common::apple());
    let progress = RecordingProgress::default();
    let config = esg_snapshot::PipelineConfig {
        delay: std::time::Duration::ZERO,
        ..Default::default()
    };

    let results = pipeline::collect(
        &provider,
        &tickers(&["AAPL", "INVALIDTICKER123"]),
        &config,
        &progress,
    )
    .await;

    assert_eq!(results.len(), 2);
    let ok = &results.records()[0];
    let bad = &results.records()[1];

    assert_eq!(ok.ticker, "AAPL");
    assert_eq!(ok.status, "Success");
    assert_eq!(ok.company_name.as_deref(), Some("Apple Inc."));
    assert_eq!(ok.stock_price, Some(250.42));
    assert_eq!(ok.roe_pct, Some(157.41));
    assert_eq!(ok.ebitda_margin_pct, Some(34.44));
    assert_eq!(ok.revenue_growth_pct, Some(2.02));

    assert_eq!(bad.ticker, "INVALIDTICKER123");
    assert_eq!(bad.data_date, "2024-12-31");
    assert!(bad.status.starts_with("Error: "));
    assert_eq!(bad.company_name, None);
    assert_eq!(bad.total_esg_score, None);
    assert_eq!(bad.stock_price, None);
    assert_eq!(bad.beta, None);

    assert_eq!(
        progress.events(),
        vec![
            "start AAPL 1/2".to_string(),
            "record AAPL Success".to_string(),
            "start INVALIDTICKER123 2/2".to_string(),
            format!("record INVALIDTICKER123 {}", bad.status),
            "done 1/2".to_string(),
        ]
    );
}

#[tokio::test]
async fn a_failure_does_not_affect_the_next_ticker() {
    let provider = FakeProvider::new()
        .with("AAPL", common::apple())
        .with("MSFT", common::apple());
    let config = esg_snapshot::PipelineConfig {
        delay: std::time::Duration::ZERO,
        ..Default::default()
    };

    let results = pipeline::collect(
        &provider,
        &tickers(&["AAPL", "BROKEN", "MSFT"]),
        &config,
        &RecordingProgress::default(),
    )
    .await;

    let statuses: Vec<_> = results.iter().map(|r| r.is_success()).collect();
    assert_eq!(statuses, vec![true, false, true]);
    assert_eq!(results.records()[2], {
        let mut expected = results.records()[0].clone();
        expected.ticker = "MSFT".into();
        expected
    });

    // the failing info request short-circuits the other calls for that ticker
    let calls = provider.calls();
    assert!(calls.contains(&"info:BROKEN".to_string()));
    assert!(!calls.contains(&"sustainability:BROKEN".to_string()));
    assert!(calls.contains(&"history:MSFT".to_string()));
}

#[tokio::test]
async fn degraded_optional_data_still_succeeds() {
    let mut company = common::apple();
    company.financials = None;
    company.prices = None;
    company.sustainability = Default::default();
    let provider = FakeProvider::new().with("NESN.SW", company);
    let config = esg_snapshot::PipelineConfig {
        delay: std::time::Duration::ZERO,
        ..Default::default()
    };

    let results = pipeline::collect(
        &provider,
        &tickers(&["NESN.SW"]),
        &config,
        &RecordingProgress::default(),
    )
    .await;

    let rec = &results.records()[0];
    assert!(rec.is_success());
    assert_eq!(rec.total_esg_score, None);
    assert_eq!(rec.stock_price, None);
    assert_eq!(rec.revenue_growth_pct, None);
    assert_eq!(rec.current_price, Some(250.42));

    let c = results.completeness();
    assert_eq!((c.with_esg, c.with_price, c.with_roe, c.with_beta), (0, 0, 1, 1));
}

#[tokio::test]
async fn full_run_writes_one_row_per_ticker() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tickers.txt");
    std::fs::write(&input, "# Swiss large caps\nAAPL\n\nINVALIDTICKER123\n").unwrap();

    let provider = FakeProvider::new().with("AAPL", common::apple());
    let config = common::config_in(dir.path(), input);

    let outcome = pipeline::run(&provider, &config, &RecordingProgress::default())
        .await
        .unwrap();

    assert_eq!(outcome.results.len(), 2);
    assert!(outcome.csv_path.starts_with(dir.path()));
    let name = outcome.csv_path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("esg_financial_analysis_20241231_"), "{name}");
    assert!(name.ends_with(".csv"));

    let mut rdr = csv::Reader::from_path(&outcome.csv_path).unwrap();
    let rows: Vec<csv::StringRecord> = rdr.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "AAPL");
    assert_eq!(&rows[0][33], "Success");
    assert_eq!(&rows[1][0], "INVALIDTICKER123");
    assert_eq!(&rows[1][1], "");
    assert!(rows[1][33].starts_with("Error: "));
}
