// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://wyseason.uwyo.edu/sta/v1.1";
pub const ROOT_PROJECT_ID: u32 = 1;
pub const USER_AGENT: &str = concat!("sta_crawl/", env!("CARGO_PKG_VERSION"));

// Pacing for the polite variant, applied before every request
pub const POLITE_DELAY_SECS: u64 = 10;

// Local store (logs)
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Export
pub const OUTPUT_FILE: &str = "things_tree.json";

/// Root collection: every Thing under the configured Project.
pub fn things_url() -> String {
    format!("{BASE_URL}/Projects({ROOT_PROJECT_ID})/Things")
}
