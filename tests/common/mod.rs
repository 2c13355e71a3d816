// tests/common/mod.rs
#![allow(dead_code)]

use std::collections::HashMap;

use serde_json::Value;
use sta_crawl::{CrawlError, Fetch, Progress, Relation};

/// In-memory service: URL → response body. Unknown URLs answer 404.
#[derive(Default)]
pub struct Canned {
    pages: HashMap<String, Value>,
    pub calls: Vec<String>,
}

impl Canned {
    pub fn new(pages: &[(&str, Value)]) -> Self {
        Self {
            pages: pages.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
            calls: Vec::new(),
        }
    }
}

impl Fetch for Canned {
    fn fetch(&mut self, url: &str) -> Result<Value, CrawlError> {
        self.calls.push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or(CrawlError::Status { url: url.to_string(), status: 404 })
    }
}

/// Records every callback for later assertions.
#[derive(Default)]
pub struct Recorder {
    pub total: Option<usize>,
    pub relations: Vec<(usize, Relation, String)>,
    pub done: Vec<String>,
    pub finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) {
        self.total = Some(total);
    }
    fn relation_fetched(&mut self, count: usize, relation: Relation, url: &str) {
        self.relations.push((count, relation, url.to_string()));
    }
    fn thing_done(&mut self, _index: usize, id: &str) {
        self.done.push(id.to_string());
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}
