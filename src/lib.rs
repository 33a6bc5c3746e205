//! Adgen - ad generator backend over the Gemini and Imagen APIs.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod gateway;
pub mod media;
pub mod ports;
pub mod prompt;
pub mod routes;
pub mod telemetry;

use std::sync::Arc;

use axum::Router;

use crate::config::Config;
use crate::context::ServiceContext;

/// Build the HTTP application for the given context.
pub fn app(config: &Config, ctx: ServiceContext) -> Router {
    let gateway = Arc::new(ctx.into_gateway(config));
    routes::router(gateway, config.server.body_limit_bytes)
}
