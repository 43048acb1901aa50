//! Backward month-by-month pagination over the previous-months endpoint.

use crate::config::Config;
use crate::flatten::{flatten_page, is_exhausted, FlatRow};
use crate::http::{ApiClient, ApiError};
use chrono::{DateTime, Duration, Local};
use log::{info, warn};

/// Fixed backward step between pages; an approximation of one month.
pub const MONTH_STEP_DAYS: i64 = 30;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collected {
    pub rows: Vec<FlatRow>,
    /// Month index of the page that ended the loop.
    pub month_index: u32,
    pub pages_fetched: u32,
    /// Set when the safety bound stopped the loop before an empty page.
    pub truncated: bool,
}

/// Walk back from the current billing cycle until a page reports no usage.
///
/// The terminating page is discarded. The first API error aborts the walk
/// and nothing collected so far is returned.
pub async fn collect_usage(
    client: &ApiClient,
    cfg: &Config,
    started_at: DateTime<Local>,
) -> Result<Collected, ApiError> {
    let subscriber_id = cfg.credentials.subscriber_id.as_str();
    let mut out = Collected::default();
    let mut extraction_date = started_at;

    loop {
        if out.month_index >= cfg.max_months {
            warn!(
                "Stopping after {} months without an empty page (SLT_MAX_MONTHS)",
                cfg.max_months
            );
            out.truncated = true;
            break;
        }

        info!(
            "Fetching usage for {} (monthIndex={})",
            extraction_date.format("%B %Y"),
            out.month_index
        );
        let page = client
            .fetch_previous_months_usage(subscriber_id, cfg.bill_date, out.month_index)
            .await?;
        out.pages_fetched += 1;

        let rows = flatten_page(&page);
        if is_exhausted(&rows) {
            info!(
                "No usage in monthIndex={} ({} days); done",
                out.month_index,
                rows.len()
            );
            break;
        }

        info!("Collected {} days for monthIndex={}", rows.len(), out.month_index);
        out.rows.extend(rows);
        out.month_index += 1;
        extraction_date -= Duration::days(MONTH_STEP_DAYS);
    }

    Ok(out)
}
