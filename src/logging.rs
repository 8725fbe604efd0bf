use std::{
    fs,
    path::Path,
    time::{Duration, SystemTime},
};

use anyhow::{Context, Result, bail};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};
use uuid::Uuid;

use crate::config::{LoggingConfig, LoggingRotation};

const LOG_FILE_PREFIX: &str = "cardionet.log";
const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Keeps the background log writer flushing. Drop it last.
pub struct LoggingGuard {
    _worker_guard: WorkerGuard,
    run_id: Uuid,
}

impl LoggingGuard {
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }
}

/// JSON lines to a rolling file, plus WARN and above on stderr when enabled.
pub fn init_tracing(config: &LoggingConfig) -> Result<LoggingGuard> {
    let filter = parse_filter(&config.filter)?;
    if config.dir.as_os_str().is_empty() {
        bail!("logging.dir cannot be empty");
    }
    fs::create_dir_all(&config.dir)
        .with_context(|| format!("failed to create log directory {}", config.dir.display()))?;

    let expired = remove_expired_logs(&config.dir, config.retention_days, SystemTime::now());
    let appender = match config.rotation {
        LoggingRotation::Daily => rolling::daily(&config.dir, LOG_FILE_PREFIX),
        LoggingRotation::Hourly => rolling::hourly(&config.dir, LOG_FILE_PREFIX),
    };
    let (writer, worker_guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_target(true)
        .with_current_span(true)
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(filter);
    let stderr_layer = config.stderr_warn_enabled.then(|| {
        fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_filter(LevelFilter::WARN)
    });

    tracing_subscriber::registry()
        .with(ErrorLayer::default())
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("tracing subscriber already installed")?;

    let run_id = Uuid::now_v7();
    tracing::info!(
        target: "logging",
        run_id = %run_id,
        dir = %config.dir.display(),
        rotation = ?config.rotation,
        retention_days = config.retention_days,
        "logging_initialized"
    );
    match expired {
        Ok(removed) if removed > 0 => {
            tracing::info!(target: "logging", removed, "expired_logs_removed")
        }
        Ok(_) => {}
        Err(err) => tracing::warn!(target: "logging", error = %err, "log_retention_failed"),
    }

    Ok(LoggingGuard {
        _worker_guard: worker_guard,
        run_id,
    })
}

fn parse_filter(filter: &str) -> Result<EnvFilter> {
    if filter.trim().is_empty() {
        bail!("logging.filter cannot be empty");
    }
    EnvFilter::try_new(filter).with_context(|| format!("invalid logging.filter '{filter}'"))
}

/// Deletes our own log files last modified before the retention cutoff.
/// Unreadable entries are skipped.
fn remove_expired_logs(dir: &Path, retention_days: usize, now: SystemTime) -> Result<usize> {
    let keep_for = Duration::from_secs((retention_days as u64).saturating_mul(SECONDS_PER_DAY));
    let cutoff = now.checked_sub(keep_for).unwrap_or(SystemTime::UNIX_EPOCH);

    let mut removed = 0;
    for entry in fs::read_dir(dir)
        .with_context(|| format!("failed to scan {}", dir.display()))?
        .flatten()
    {
        if !entry.file_name().to_string_lossy().starts_with(LOG_FILE_PREFIX) {
            continue;
        }
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        let expired = metadata.is_file()
            && metadata
                .modified()
                .is_ok_and(|modified| modified <= cutoff);
        if expired {
            fs::remove_file(entry.path())
                .with_context(|| format!("failed to remove {}", entry.path().display()))?;
            removed += 1;
        }
    }
    Ok(removed)
}
