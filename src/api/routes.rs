//! Route table - explicit registry of callable methods

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::api::fonts::get_google_fonts;
use crate::api::Context;
use crate::core::error::{LoadError, RouteError};
use crate::core::render::{RenderConfig, Renderer};

/// Endpoint signature: no caller arguments, JSON result
pub type Handler = fn(&Context) -> Result<Value, LoadError>;

#[derive(Clone, Serialize)]
pub struct Route {
    pub method: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    handler: Handler,
}

#[derive(Default)]
pub struct RouteTable {
    routes: BTreeMap<&'static str, Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with every built-in endpoint registered
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.register(
            "get_google_fonts",
            "Bundled Google Fonts catalogue (cached under 'google_fonts')",
            get_google_fonts,
        );
        table
    }

    /// Register a handler; a later registration under the same name replaces it
    pub fn register(&mut self, method: &'static str, description: &'static str, handler: Handler) {
        self.routes.insert(
            method,
            Route {
                method,
                description,
                handler,
            },
        );
    }

    /// Dispatch a call by exact method name
    pub fn call(&self, method: &str, ctx: &Context) -> Result<Value, RouteError> {
        let route = self
            .routes
            .get(method)
            .ok_or_else(|| RouteError::UnknownMethod(method.to_string()))?;
        tracing::debug!(method, "dispatching call");
        Ok((route.handler)(ctx)?)
    }

    /// Registered routes in method-name order
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }
}

/// Invoke a method and print its result
pub fn run_call(
    table: &RouteTable,
    method: &str,
    ctx: &Context,
    config: RenderConfig,
) -> Result<()> {
    let value = table.call(method, ctx)?;
    Renderer::with_config(config).render_to(&value, std::io::stdout().lock())?;
    Ok(())
}

/// Print the registered methods
pub fn run_routes(table: &RouteTable, config: RenderConfig) -> Result<()> {
    let listing = serde_json::to_value(table.routes().collect::<Vec<_>>())?;
    Renderer::with_config(config).render_to(&listing, std::io::stdout().lock())?;
    Ok(())
}
