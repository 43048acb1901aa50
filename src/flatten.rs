//! Flattening of daily usage records into export rows.

use crate::types::{DailyRecord, PackageKind, UsagePage};
use log::warn;

/// Total usage value the provider reports for days without traffic.
pub const ZERO_USAGE: &str = "0.0";

/// One exported line. `None` cells are written blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatRow {
    pub date: Option<String>,
    pub usage_unit: Option<String>,
    pub total_usage: Option<String>,
    pub standard_total: Option<String>,
    pub standard_peak_download: Option<String>,
    pub standard_peak_upload: Option<String>,
    pub standard_off_peak_download: Option<String>,
    pub standard_off_peak_upload: Option<String>,
    pub loyalty_total: Option<String>,
    pub meet_max_total: Option<String>,
}

impl FlatRow {
    pub const COLUMNS: [&'static str; 10] = [
        "Date",
        "Usage Unit",
        "Total Usage",
        "Standard Package Total Usage",
        "Standard Package Peak Download",
        "Standard Package Peak Upload",
        "Standard Package Off-Peak Download",
        "Standard Package Off-Peak Upload",
        "Loyalty Data Total Usage",
        "Meet Max Package Total Usage",
    ];

    pub fn cells(&self) -> [&str; 10] {
        [
            cell(&self.date),
            cell(&self.usage_unit),
            cell(&self.total_usage),
            cell(&self.standard_total),
            cell(&self.standard_peak_download),
            cell(&self.standard_peak_upload),
            cell(&self.standard_off_peak_download),
            cell(&self.standard_off_peak_upload),
            cell(&self.loyalty_total),
            cell(&self.meet_max_total),
        ]
    }

    pub fn is_zero_usage(&self) -> bool {
        self.total_usage.as_deref() == Some(ZERO_USAGE)
    }
}

fn cell(v: &Option<String>) -> &str {
    v.as_deref().unwrap_or("")
}

pub fn flatten_record(record: &DailyRecord) -> FlatRow {
    let mut row = FlatRow {
        date: Some(record.date.clone()),
        usage_unit: record.volume_unit.clone(),
        total_usage: record.daily_total_usage.clone(),
        ..Default::default()
    };

    let Some(usages) = record.usages.as_ref() else {
        return row;
    };
    for usage in usages {
        match usage.kind() {
            PackageKind::Standard => {
                row.standard_total = usage.volume.clone();
                if let Some(v) = usage.volumes.as_ref() {
                    row.standard_peak_download = v.pdl.clone();
                    row.standard_peak_upload = v.pul.clone();
                    row.standard_off_peak_download = v.opdl.clone();
                    row.standard_off_peak_upload = v.opul.clone();
                }
            }
            PackageKind::Loyalty => row.loyalty_total = usage.volume.clone(),
            PackageKind::MeetMax => row.meet_max_total = usage.volume.clone(),
            PackageKind::Unrecognized(name) => {
                warn!(
                    "Unrecognized package {:?} on {}; skipping",
                    name.as_deref().unwrap_or("<unnamed>"),
                    record.date
                );
            }
        }
    }
    row
}

/// Rows come out in the same order as the page's daily list.
pub fn flatten_page(page: &UsagePage) -> Vec<FlatRow> {
    page.records().iter().map(flatten_record).collect()
}

/// True when every row reports zero usage, including the empty page.
pub fn is_exhausted(rows: &[FlatRow]) -> bool {
    rows.iter().all(FlatRow::is_zero_usage)
}
