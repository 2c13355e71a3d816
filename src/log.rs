// src/log.rs
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use std::time::{Duration, Instant};

use tracing_subscriber::fmt::{format::Writer, time::FormatTime};
use tracing_subscriber::EnvFilter;

use crate::config::consts::{LOG_FILE, STORE_DIR};
use crate::error::{CrawlError, Result};
use crate::file::ensure_directory;

static START: OnceLock<Instant> = OnceLock::new();

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

/// Timestamps log lines with time since process start.
struct SinceStart;

impl FormatTime for SinceStart {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "[{}]", fmt_elapsed(start().elapsed().as_millis()))
    }
}

/// Route `tracing` output to `.store/debug.log` (append). `RUST_LOG` wins over
/// the default level. Returns the log path.
pub fn init(verbose: bool) -> Result<PathBuf> {
    start();
    let dir = Path::new(STORE_DIR);
    ensure_directory(dir)?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| CrawlError::Io { path: path.clone(), source })?;

    let default = if verbose { "sta_crawl=debug" } else { "sta_crawl=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(SinceStart)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| CrawlError::Logging(e.to_string()))?;
    Ok(path)
}

/// Split wall time into hours, minutes and (fractional) seconds.
pub fn hms(d: Duration) -> (u64, u64, f64) {
    let secs = d.as_secs();
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = (secs % 60) as f64 + f64::from(d.subsec_millis()) / 1000.0;
    (h, m, s)
}

pub fn elapsed_summary(d: Duration) -> String {
    let (h, m, s) = hms(d);
    format!("Elapsed time: {h} hours, {m} minutes, {s:.2} seconds")
}
