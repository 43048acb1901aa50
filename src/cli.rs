use chrono::Local;
use clap::{Arg, ArgAction, Command};
use log::{Log, Metadata, Record};
use std::fs::{self, File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::Path;
use std::sync::Mutex;

pub fn build_cli() -> Command {
    Command::new("slt-daily-usage")
        .about("Export SLT daily broadband usage history to CSV")
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .num_args(1)
                .help("Override RUST_LOG level (e.g., info, debug)"),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .help("Print version and exit")
                .action(ArgAction::SetTrue),
        )
}

/// Console logger (env_logger, colored) that also appends every accepted
/// record to the run's log file.
struct TeeLogger {
    console: env_logger::Logger,
    file: Option<Mutex<LineWriter<File>>>,
}

impl Log for TeeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.console.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.console.matches(record) {
            return;
        }
        self.console.log(record);
        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = writeln!(f, "{}", file_line(record));
            }
        }
    }

    fn flush(&self) {
        self.console.flush();
        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = f.flush();
            }
        }
    }
}

fn file_line(record: &Record) -> String {
    format!(
        "{} {:<5} {}: {}",
        Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.target(),
        record.args()
    )
}

pub fn init_logging(level: Option<&str>, log_file: Option<&Path>) -> anyhow::Result<()> {
    // Respect explicit level, else default to info, allow env override via RUST_LOG
    if let Some(lvl) = level {
        std::env::set_var("RUST_LOG", lvl);
    } else if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    let console =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).build();

    let file = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let f = OpenOptions::new().create(true).append(true).open(path)?;
            Some(Mutex::new(LineWriter::new(f)))
        }
        None => None,
    };

    log::set_max_level(console.filter());
    log::set_boxed_logger(Box::new(TeeLogger { console, file }))?;
    Ok(())
}
