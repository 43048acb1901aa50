use std::env;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://omniscapp.slt.lk/mobitelint/slt/api";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/44.0.2403.157 Safari/537.36";
pub const DEFAULT_BILL_DATE: u32 = 1;
pub const DEFAULT_MAX_MONTHS: u32 = 120;

/// Subscriber credentials issued by the provider's app login.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: String,
    pub client_id: String,
    pub subscriber_id: String,
}

impl Credentials {
    /// Names of the credential variables that resolved to empty strings.
    /// Empty values are still sent; callers only warn about them.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("ACCESS_TOKEN", &self.access_token),
            ("CLIENT_ID", &self.client_id),
            ("SUBSCRIBER_ID", &self.subscriber_id),
        ]
        .into_iter()
        .filter(|(_, v)| v.is_empty())
        .map(|(k, _)| k)
        .collect()
    }
}

/// Runtime configuration for a single export run.
/// Built once at startup and handed to the client and the driver.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub bill_date: u32,
    pub max_months: u32,
    pub output_dir: PathBuf,
}

impl Config {
    /// Load configuration from the process environment (after `.env`).
    ///
    /// Env vars:
    /// - ACCESS_TOKEN, CLIENT_ID, SUBSCRIBER_ID (missing values are sent empty)
    /// - SLT_API_BASE_URL (default: https://omniscapp.slt.lk/mobitelint/slt/api)
    /// - SLT_USER_AGENT (default: desktop Chrome UA)
    /// - SLT_HTTP_TIMEOUT_SECS (default: 30)
    /// - SLT_BILL_DATE (default: 1)
    /// - SLT_MAX_MONTHS (default: 120)
    /// - OUTPUT_DIR (default: data)
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credential = |key: &str| lookup(key).unwrap_or_default();
        let credentials = Credentials {
            access_token: credential("ACCESS_TOKEN"),
            client_id: credential("CLIENT_ID"),
            subscriber_id: credential("SUBSCRIBER_ID"),
        };

        let raw_base = lookup("SLT_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        url::Url::parse(&raw_base)
            .map_err(|e| format!("Invalid SLT_API_BASE_URL {:?}: {}", raw_base, e))?;
        let base_url = raw_base.trim_end_matches('/').to_string();

        let user_agent = lookup("SLT_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let timeout_secs = parse_or(&lookup, "SLT_HTTP_TIMEOUT_SECS", 30u64);
        let bill_date = parse_or(&lookup, "SLT_BILL_DATE", DEFAULT_BILL_DATE);
        let max_months = parse_or(&lookup, "SLT_MAX_MONTHS", DEFAULT_MAX_MONTHS);
        let output_dir = lookup("OUTPUT_DIR")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data"));

        Ok(Self {
            credentials,
            base_url,
            user_agent,
            timeout_secs,
            bill_date,
            max_months,
            output_dir,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|s| s.trim().parse::<T>().ok())
        .unwrap_or(default)
}
