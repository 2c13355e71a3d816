// src/lib.rs
//! Recursive crawler for a SensorThings API service.
//!
//! Walks Things → {HistoricalLocations, Locations, MultiDatastreams, Projects,
//! Datastreams → Observations}, keeps a fixed set of fields per entity type,
//! and writes the nested result as one JSON document.

pub mod config;
pub mod core;
pub mod entity;
pub mod error;
pub mod file;
pub mod log;
pub mod progress;
pub mod project;
pub mod runner;
pub mod tree;

#[cfg(feature = "cli")]
pub mod cli;

pub use crate::config::CrawlOptions;
pub use crate::core::{Fetch, HttpFetcher};
pub use crate::entity::{EntityType, Relation};
pub use crate::error::{CrawlError, Result};
pub use crate::progress::{NullProgress, Progress};
pub use crate::project::{project, project_named};
pub use crate::runner::{crawl_to_path, run, RunSummary};
pub use crate::tree::Crawler;
