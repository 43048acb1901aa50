use crate::config::Config;
use crate::types::{ApiEnvelope, UsagePage};
use chrono::NaiveDate;
use log::{debug, error};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT_LANGUAGE, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const PREVIOUS_DAILY_USAGE_PATH: &str = "/BBVAS/EnhancedPreviousDailyUsage";
pub const CURRENT_DAILY_USAGE_PATH: &str = "/BBVAS/EnhancedCurrentDailyUsage";
pub const PROTOCOL_REPORT_PATH: &str = "/BBVAS/ProtocolReport";
pub const CLIENT_ID_HEADER: &str = "x-ibm-client-id";
pub const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid header value for {0}")]
    InvalidHeader(String),
    #[error("API error (status {status}): {message} [{detail}]")]
    Api {
        status: StatusCode,
        message: String,
        detail: String,
    },
}

/// Thin client for the BBVAS usage endpoints. One GET per call, no retries.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

pub fn default_headers(cfg: &Config) -> Result<HeaderMap, ApiError> {
    let value = |name: &str, raw: String| {
        HeaderValue::from_str(&raw).map_err(|_| ApiError::InvalidHeader(name.to_string()))
    };
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, value("User-Agent", cfg.user_agent.clone())?);
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));
    headers.insert(
        AUTHORIZATION,
        value(
            "Authorization",
            format!("bearer {}", cfg.credentials.access_token),
        )?,
    );
    headers.insert(
        HeaderName::from_static(CLIENT_ID_HEADER),
        value("X-Ibm-Client-Id", cfg.credentials.client_id.clone())?,
    );
    Ok(headers)
}

impl ApiClient {
    pub fn new(cfg: &Config) -> Result<Self, ApiError> {
        let http = Client::builder()
            .default_headers(default_headers(cfg)?)
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .use_rustls_tls()
            .build()?;
        Ok(Self {
            http,
            base_url: cfg.base_url.clone(),
        })
    }

    pub async fn fetch_previous_months_usage(
        &self,
        subscriber_id: &str,
        bill_date: u32,
        month_index: u32,
    ) -> Result<UsagePage, ApiError> {
        let query = [
            ("subscriberID", subscriber_id.to_string()),
            ("billDate", bill_date.to_string()),
            ("monthIndex", month_index.to_string()),
        ];
        let page: Option<UsagePage> = self.get_bundle(PREVIOUS_DAILY_USAGE_PATH, &query).await?;
        Ok(page.unwrap_or_default())
    }

    pub async fn fetch_current_month_usage(
        &self,
        subscriber_id: &str,
        bill_date: u32,
    ) -> Result<UsagePage, ApiError> {
        let query = [
            ("subscriberID", subscriber_id.to_string()),
            ("billDate", bill_date.to_string()),
        ];
        let page: Option<UsagePage> = self.get_bundle(CURRENT_DAILY_USAGE_PATH, &query).await?;
        Ok(page.unwrap_or_default())
    }

    /// Per-protocol breakdown for one day. The report layout is not modelled.
    pub async fn fetch_protocol_report(
        &self,
        subscriber_id: &str,
        date: NaiveDate,
    ) -> Result<serde_json::Value, ApiError> {
        let query = [
            ("subscriberID", subscriber_id.to_string()),
            ("date", date.format("%Y-%m-%d").to_string()),
        ];
        let report: Option<serde_json::Value> = self.get_bundle(PROTOCOL_REPORT_PATH, &query).await?;
        Ok(report.unwrap_or(serde_json::Value::Null))
    }

    async fn get_bundle<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);
        let res = self.http.get(&url).query(query).send().await?;
        let status = res.status();
        let text = res.text().await?;
        decode_envelope(status, &text)
    }
}

/// Unwrap the provider envelope, turning non-200 statuses and
/// `isSuccess: false` into `ApiError::Api`.
pub fn decode_envelope<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> Result<Option<T>, ApiError> {
    if status != StatusCode::OK {
        let (message, detail) = match serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body) {
            Ok(env) => (
                env.error_message.unwrap_or_default(),
                env.exception_detail.unwrap_or_default(),
            ),
            Err(_) => (body.trim().to_string(), String::new()),
        };
        return Err(api_failure(status, message, detail));
    }
    let env: ApiEnvelope<T> = serde_json::from_str(body)?;
    if !env.is_success {
        return Err(api_failure(
            status,
            env.error_message.unwrap_or_default(),
            env.exception_detail.unwrap_or_default(),
        ));
    }
    Ok(env.data_bundle)
}

fn api_failure(status: StatusCode, message: String, detail: String) -> ApiError {
    error!(
        "API request failed (status {}): message={:?} exception={:?}",
        status, message, detail
    );
    ApiError::Api {
        status,
        message,
        detail,
    }
}
