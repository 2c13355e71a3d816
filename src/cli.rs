// src/cli.rs
use std::{path::PathBuf, time::Duration};

use clap::Parser;
use color_eyre::eyre::WrapErr;

use crate::config::{consts::POLITE_DELAY_SECS, CrawlOptions};
use crate::entity::Relation;
use crate::progress::Progress;

/// Crawl the Things of the configured SensorThings project into one JSON tree.
#[derive(Parser, Debug)]
#[command(name = "sta_crawl", version, about, long_about = None)]
pub struct Args {
    /// Output file (overwritten).
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Pause this many seconds before every request.
    #[arg(long, value_name = "SECS", conflicts_with = "polite")]
    pub delay: Option<u64>,

    /// Pause the default polite interval before every request.
    #[arg(long)]
    pub polite: bool,

    /// Print a running count of relation fetches.
    #[arg(long)]
    pub count: bool,

    /// Print total wall time at the end.
    #[arg(long)]
    pub timed: bool,

    /// Do not fetch Observations under Datastreams.
    #[arg(long)]
    pub no_observations: bool,

    /// Polite, counted, timed, no Observations.
    #[arg(long)]
    pub instrumented: bool,

    /// Debug-level logging to the log file.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn options(&self) -> CrawlOptions {
        let mut o = if self.instrumented { CrawlOptions::instrumented() } else { CrawlOptions::full() };
        if let Some(out) = &self.out {
            o.out = out.clone();
        }
        if let Some(secs) = self.delay {
            o.request_delay = Some(Duration::from_secs(secs));
        } else if self.polite {
            o.request_delay = Some(Duration::from_secs(POLITE_DELAY_SECS));
        }
        o.count_requests |= self.count;
        o.report_elapsed |= self.timed;
        if self.no_observations {
            o.include_observations = false;
        }
        o
    }
}

/// Console sink: the running counter, one line per relation fetch.
pub struct ConsolePrinter {
    count_requests: bool,
}

impl Progress for ConsolePrinter {
    fn relation_fetched(&mut self, count: usize, _relation: Relation, _url: &str) {
        if self.count_requests {
            println!("{count}");
        }
    }
}

pub fn run() -> color_eyre::Result<()> {
    let args = Args::parse();
    crate::log::init(args.verbose).wrap_err("could not set up logging")?;

    let options = args.options();
    let mut printer = ConsolePrinter { count_requests: options.count_requests };
    let summary = crate::runner::run(&options, &mut printer).wrap_err("crawl aborted")?;

    println!("JSON tree saved to {}.", summary.path.display());
    if options.report_elapsed {
        println!("{}", crate::log::elapsed_summary(summary.elapsed));
    }
    Ok(())
}
