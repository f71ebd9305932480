//! Font catalogue endpoint

use anyhow::Result;
use serde_json::Value;

use crate::api::Context;
use crate::core::error::LoadError;
use crate::core::render::{RenderConfig, Renderer};

/// Cache key for the bundled font catalogue
pub const GOOGLE_FONTS_KEY: &str = "google_fonts";

/// Return the bundled font catalogue, loading it into the cache on first use
pub fn get_google_fonts(ctx: &Context) -> Result<Value, LoadError> {
    ctx.fonts().get_cached_value()
}

/// Print the catalogue, optionally followed by loader counters on stderr
pub fn run_fonts(ctx: &Context, stats: bool, config: RenderConfig) -> Result<()> {
    let value = get_google_fonts(ctx)?;
    Renderer::with_config(config).render_to(&value, std::io::stdout().lock())?;

    if stats {
        let loader = ctx.fonts();
        let report = serde_json::json!({
            "key": loader.key(),
            "source": loader.source().display().to_string(),
            "stats": loader.stats(),
        });
        eprintln!("{}", report);
    }
    Ok(())
}
