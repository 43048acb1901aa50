use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response envelope shared by every BBVAS endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub is_success: bool,
    // The provider spells this "errorMessege".
    #[serde(default, rename = "errorMessege", alias = "errorMessage")]
    pub error_message: Option<String>,
    #[serde(default)]
    pub exception_detail: Option<String>,
    pub data_bundle: Option<T>,
}

/// One month of daily usage, as returned by the daily usage endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsagePage {
    #[serde(default, rename = "dailylist", alias = "daily_list")]
    pub daily_list: Option<Vec<DailyRecord>>,
}

impl UsagePage {
    pub fn records(&self) -> &[DailyRecord] {
        self.daily_list.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "opt_text")]
    pub volume_unit: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub daily_total_usage: Option<String>,
    #[serde(default)]
    pub usages: Option<Vec<PackageUsage>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageUsage {
    #[serde(default, deserialize_with = "opt_int")]
    pub sorter: Option<i64>,
    #[serde(default)]
    pub offer_name: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub volume: Option<String>,
    #[serde(default)]
    pub volumes: Option<PeakVolumes>,
}

/// Peak/off-peak download and upload volumes of the standard package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeakVolumes {
    #[serde(default, deserialize_with = "opt_text")]
    pub pdl: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub pul: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub opdl: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub opul: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageKind {
    Standard,
    Loyalty,
    MeetMax,
    Unrecognized(Option<String>),
}

pub const STANDARD_SORTER: i64 = 1;
pub const LOYALTY_OFFER: &str = "Loyalty";
pub const MEET_OFFERS: [&str; 2] = ["Meet Max", "Meet Lite"];

impl PackageUsage {
    /// Sorter wins over offer name: a sorter of 1 is always the standard package.
    pub fn kind(&self) -> PackageKind {
        if self.sorter == Some(STANDARD_SORTER) {
            return PackageKind::Standard;
        }
        match self.offer_name.as_deref() {
            Some(LOYALTY_OFFER) => PackageKind::Loyalty,
            Some(name) if MEET_OFFERS.contains(&name) => PackageKind::MeetMax,
            other => PackageKind::Unrecognized(other.map(str::to_string)),
        }
    }
}

// Volumes arrive as strings ("3.1") but older payloads send bare numbers.
fn opt_text<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(d)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

fn opt_int<'de, D>(d: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(d)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_i64()),
        Some(Value::String(s)) => Ok(s.trim().parse::<i64>().ok()),
        Some(other) => Err(de::Error::custom(format!(
            "expected integer sorter, got {}",
            other
        ))),
    }
}
