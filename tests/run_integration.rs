mod common;

use chrono::{Local, TimeZone};
use common::*;
use httpmock::{Method::GET, MockServer};
use serde_json::json;
use slt_daily_usage::http::PREVIOUS_DAILY_USAGE_PATH;
use slt_daily_usage::run::run;

#[tokio::test]
async fn writes_dated_export_with_collected_rows() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let _p0 = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(PREVIOUS_DAILY_USAGE_PATH)
                .query_param("monthIndex", "0");
            then.status(200).json_body(ok_page(vec![json!({
                "date": "2024-05-01",
                "volume_unit": "GB",
                "daily_total_usage": "3.1",
                "usages": [
                    {"sorter": 1, "volume": "3.1", "volumes": {"pdl": "1", "pul": "1", "opdl": "0.5", "opul": "0.5"}},
                    {"sorter": 5, "offer_name": "Mystery Pack", "volume": "8.0"}
                ]
            })]));
        })
        .await;
    let _p1 = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(PREVIOUS_DAILY_USAGE_PATH)
                .query_param("monthIndex", "1");
            then.status(200).json_body(ok_page(vec![day("2024-04-30", "0.0")]));
        })
        .await;

    let dir = tempfile::tempdir()?;
    let cfg = config(&server.base_url(), dir.path(), &[]);
    let started = Local.with_ymd_and_hms(2024, 5, 20, 14, 30, 0).unwrap();
    let summary = run(&cfg, started).await?;

    assert_eq!(
        summary.export_path,
        dir.path().join("daily-usage-20-05-2024_14:30:00.csv")
    );
    assert_eq!(summary.rows, 1);
    assert_eq!(summary.months, 1);
    assert!(!summary.truncated);

    let text = std::fs::read_to_string(&summary.export_path)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "0,2024-05-01,GB,3.1,3.1,1,1,0.5,0.5,,");
    Ok(())
}

#[tokio::test]
async fn api_failure_writes_no_export() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let _m = server
        .mock_async(|when, then| {
            when.method(GET).path(PREVIOUS_DAILY_USAGE_PATH);
            then.status(500)
                .json_body(failure("Internal error", "NullReferenceException"));
        })
        .await;

    let dir = tempfile::tempdir()?;
    let cfg = config(&server.base_url(), dir.path(), &[]);
    let err = run(&cfg, Local::now()).await.unwrap_err();
    assert!(format!("{:#}", err).contains("Internal error"));
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}
