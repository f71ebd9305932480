//! fontcache - serves a bundled font catalogue through a read-through cache
//!
//! fontcache provides:
//! - A cached loader for JSON source files behind an injected cache store
//! - In-memory and on-disk cache stores with an optional TTL
//! - An explicit route table of callable endpoints
//! - Cache inspection and invalidation commands

use anyhow::Result;
use clap::Parser;

mod api;
mod cache;
mod cli;
mod config;
mod core;
mod logging;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose, cli.quiet)?;
    cli::run(cli)
}
