// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

/// Knobs that distinguish the crawl variants. The target (base URL, root
/// project) is not one of them; see `consts`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrawlOptions {
    /// Fixed pause before every HTTP request.
    pub request_delay: Option<Duration>,
    /// Follow each Datastream's Observations link.
    pub include_observations: bool,
    /// Print the running relation-fetch counter.
    pub count_requests: bool,
    /// Print wall-clock time at the end.
    pub report_elapsed: bool,
    pub out: PathBuf,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self::full()
    }
}

impl CrawlOptions {
    /// Whole tree down to Observations, no pacing, quiet.
    pub fn full() -> Self {
        Self {
            request_delay: None,
            include_observations: true,
            count_requests: false,
            report_elapsed: false,
            out: PathBuf::from(OUTPUT_FILE),
        }
    }

    /// Paced, counted and timed; Datastreams stay flat.
    pub fn instrumented() -> Self {
        Self {
            request_delay: Some(Duration::from_secs(POLITE_DELAY_SECS)),
            include_observations: false,
            count_requests: true,
            report_elapsed: true,
            out: PathBuf::from(OUTPUT_FILE),
        }
    }
}
