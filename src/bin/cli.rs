// src/bin/cli.rs
use sta_crawl::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run()
}
