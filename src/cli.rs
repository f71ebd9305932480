//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::api::routes::RouteTable;
use crate::api::Context;
use crate::config::{AppConfig, StoreKind};
use crate::core::render::{OutputFormat, RenderConfig};

/// fontcache - serve a bundled font catalogue through a read-through cache.
#[derive(Parser, Debug)]
#[command(name = "fontcache")]
#[command(
    author,
    version,
    about,
    long_about = r#"fontcache loads a bundled JSON font catalogue once and serves it from a
cache on every later call.

The cache store is injected: `file` keeps entries under ROOT/.fontcache so they
survive between invocations, `memory` keeps them for the current process only.

Output formats:
- json: the value as a single JSON document (default)
- jsonl: one array element per line

Examples:
    fontcache fonts
    fontcache --store memory fonts --stats
    fontcache call get_google_fonts --format jsonl
    fontcache cache clear
"#
)]
pub struct Cli {
    /// Application root directory.
    #[arg(
        long,
        global = true,
        default_value = ".",
        env = "FONTCACHE_ROOT",
        value_name = "ROOT",
        long_help = "Application root directory (defaults to the current directory).\n\n\
Bundled data is resolved under ROOT/data and the file cache lives in ROOT/.fontcache."
    )]
    pub root: PathBuf,

    /// Override the font catalogue path.
    #[arg(
        long,
        global = true,
        env = "FONTCACHE_SOURCE",
        value_name = "PATH",
        long_help = "Path of the JSON font catalogue. Relative paths are resolved against ROOT.\n\n\
Defaults to ROOT/data/google_fonts.json."
    )]
    pub source: Option<PathBuf>,

    /// Cache store backend (memory/file).
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = StoreKind::File,
        env = "FONTCACHE_STORE",
        value_name = "STORE"
    )]
    pub store: StoreKind,

    /// Expire cache entries after this many seconds.
    #[arg(
        long,
        global = true,
        env = "FONTCACHE_TTL",
        value_name = "SECONDS",
        long_help = "Expire cache entries this many seconds after they were stored.\n\n\
If omitted, entries never expire and are only removed by `fontcache cache clear`."
    )]
    pub ttl: Option<u64>,

    /// Output format (json/jsonl).
    #[arg(long, global = true, default_value = "json", value_name = "FORMAT")]
    pub format: String,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the font catalogue (get_google_fonts).
    Fonts {
        /// Print loader hit/miss counters on stderr.
        #[arg(long)]
        stats: bool,
    },

    /// Invoke a registered method by name.
    #[command(long_about = "Dispatch a call through the route table.\n\n\
Example:\n\
  fontcache call get_google_fonts\n")]
    Call {
        /// Method name (see `fontcache routes`).
        #[arg(value_name = "METHOD")]
        method: String,
    },

    /// List registered methods.
    Routes,

    /// Inspect or invalidate cache entries.
    Cache {
        #[command(subcommand)]
        action: CacheCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// List live cache keys.
    List,

    /// Print the cached value for a key.
    Get {
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Remove one entry, or every entry when no key is given.
    Clear {
        #[arg(long, value_name = "KEY")]
        key: Option<String>,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli
        .format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    let root = cli.root.canonicalize().unwrap_or(cli.root);
    let config = AppConfig::new(root, cli.source, cli.store, cli.ttl);
    tracing::debug!(?config, "resolved configuration");

    let routes = RouteTable::with_defaults();
    // Only commands that use the cache open the store
    let open_context = || Context::from_config(&config).context("Failed to open cache store");

    match cli.command {
        Commands::Fonts { stats } => {
            crate::api::fonts::run_fonts(&open_context()?, stats, render_config)
        }
        Commands::Call { method } => {
            crate::api::routes::run_call(&routes, &method, &open_context()?, render_config)
        }
        Commands::Routes => crate::api::routes::run_routes(&routes, render_config),
        Commands::Cache { action } => {
            let ctx = open_context()?;
            match action {
                CacheCommands::List => crate::cache::admin::run_list(ctx.store(), render_config),
                CacheCommands::Get { key } => {
                    crate::cache::admin::run_get(ctx.store(), &key, render_config)
                }
                CacheCommands::Clear { key } => {
                    crate::cache::admin::run_clear(ctx.store(), key.as_deref(), render_config)
                }
            }
        }
    }
}
