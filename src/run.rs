use crate::config::Config;
use crate::driver::collect_usage;
use crate::export::{artifact_path, run_stamp, write_table};
use crate::http::ApiClient;
use chrono::{DateTime, Local};
use log::info;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub export_path: PathBuf,
    pub rows: usize,
    pub months: u32,
    pub truncated: bool,
}

/// One full export: paginate, then write the table once at the end.
/// Any API error aborts the run before the export is written.
pub async fn run(cfg: &Config, started_at: DateTime<Local>) -> anyhow::Result<RunSummary> {
    let client = ApiClient::new(cfg)?;
    let collected = collect_usage(&client, cfg, started_at).await?;

    let export_path = artifact_path(&cfg.output_dir, &run_stamp(started_at), "csv");
    write_table(&export_path, &collected.rows)?;
    info!(
        "Wrote {} rows covering {} months to {}",
        collected.rows.len(),
        collected.month_index,
        export_path.display()
    );

    Ok(RunSummary {
        export_path,
        rows: collected.rows.len(),
        months: collected.month_index,
        truncated: collected.truncated,
    })
}
