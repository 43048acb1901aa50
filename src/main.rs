mod cli;

use chrono::Local;
use log::{error, info, warn};
use slt_daily_usage::config::Config;
use slt_daily_usage::export::{artifact_path, run_stamp};

#[tokio::main(flavor = "current_thread")] // requests are strictly sequential
async fn main() -> anyhow::Result<()> {
    let cmd = cli::build_cli();
    let matches = cmd.get_matches();
    let log_level = matches.get_one::<String>("log-level").cloned();
    let version_flag = matches.get_flag("version");

    if version_flag {
        println!("slt-daily-usage {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let started_at = Local::now();
    let cfg = Config::from_env().map_err(anyhow::Error::msg)?;
    let log_path = artifact_path(&cfg.output_dir, &run_stamp(started_at), "log");
    cli::init_logging(log_level.as_deref(), Some(log_path.as_path()))?;
    for key in cfg.credentials.missing() {
        warn!("{} is not set; sending it empty", key);
    }
    info!(
        "Starting daily usage export for subscriber {}",
        cfg.credentials.subscriber_id
    );

    match slt_daily_usage::run::run(&cfg, started_at).await {
        Ok(summary) => {
            if summary.truncated {
                info!("Export stopped at the month limit; older history was not fetched");
            }
            info!("Export complete: {}", summary.export_path.display());
            Ok(())
        }
        Err(e) => {
            error!("Aborting run, no export written: {:#}", e);
            Err(e)
        }
    }
}
