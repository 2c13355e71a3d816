// src/runner.rs
use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::info;

use crate::{
    config::{consts::things_url, CrawlOptions},
    core::{Fetch, HttpFetcher},
    error::Result,
    file::write_json_pretty,
    progress::Progress,
    tree::Crawler,
};

/// Summary of what was produced.
#[derive(Debug)]
pub struct RunSummary {
    pub path: PathBuf,
    pub things: usize,
    pub relation_fetches: usize,
    pub elapsed: Duration,
}

/// Top-level runner against the configured service.
pub fn run(options: &CrawlOptions, progress: &mut dyn Progress) -> Result<RunSummary> {
    let fetcher = HttpFetcher::new()?.with_pause(options.request_delay);
    crawl_to_path(fetcher, &things_url(), options, progress)
}

/// Crawl from `root_url` with any fetcher and write the tree to `options.out`.
/// Nothing is written unless the whole traversal succeeds.
pub fn crawl_to_path<F: Fetch>(
    fetcher: F,
    root_url: &str,
    options: &CrawlOptions,
    progress: &mut dyn Progress,
) -> Result<RunSummary> {
    let started = Instant::now();
    info!(root_url, out = %options.out.display(), "crawl started");

    let mut crawler = Crawler::new(fetcher, options, progress);
    let tree = crawler.build_things_tree(root_url)?;
    let relation_fetches = crawler.relation_fetches();
    let things = tree.len();

    let path = write_json_pretty(&options.out, &Value::Array(tree))?;
    let elapsed = started.elapsed();
    info!(things, relation_fetches, elapsed_ms = elapsed.as_millis() as u64, "crawl finished");

    Ok(RunSummary { path, things, relation_fetches, elapsed })
}
