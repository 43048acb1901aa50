#![allow(dead_code)]

use serde_json::{json, Value};
use slt_daily_usage::config::Config;
use std::path::Path;

pub const TOKEN: &str = "tok-123";
pub const CLIENT_ID: &str = "client-abc";
pub const SUBSCRIBER: &str = "94112345678";

pub fn config(base_url: &str, output_dir: &Path, extra: &[(&str, &str)]) -> Config {
    let mut pairs: Vec<(String, String)> = vec![
        ("ACCESS_TOKEN".into(), TOKEN.into()),
        ("CLIENT_ID".into(), CLIENT_ID.into()),
        ("SUBSCRIBER_ID".into(), SUBSCRIBER.into()),
        ("SLT_API_BASE_URL".into(), base_url.into()),
        ("OUTPUT_DIR".into(), output_dir.display().to_string()),
        ("SLT_HTTP_TIMEOUT_SECS".into(), "5".into()),
    ];
    for (k, v) in extra {
        pairs.push((k.to_string(), v.to_string()));
    }
    Config::from_lookup(|key| {
        pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .unwrap()
}

pub fn day(date: &str, total: &str) -> Value {
    json!({
        "date": date,
        "volume_unit": "GB",
        "daily_total_usage": total,
        "usages": [{
            "sorter": 1,
            "offer_name": "Any Beat",
            "volume": total,
            "volumes": {"pdl": total, "pul": "0.0", "opdl": "0.0", "opul": "0.0"}
        }]
    })
}

pub fn ok_page(days: Vec<Value>) -> Value {
    json!({
        "isSuccess": true,
        "errorMessege": null,
        "exceptionDetail": null,
        "dataBundle": {"dailylist": days}
    })
}

pub fn failure(message: &str, detail: &str) -> Value {
    json!({
        "isSuccess": false,
        "errorMessege": message,
        "exceptionDetail": detail,
        "dataBundle": null
    })
}
