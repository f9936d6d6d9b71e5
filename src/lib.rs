//! NumInfo Lookup Service Library
//!
//! This library provides the number lookup web page: a form that forwards a
//! term to the remote lookup API (or a deterministic mock), normalizes the
//! loosely structured response, and renders it as summary cards, raw JSON,
//! or a CSV download.
//!
//! # Modules
//!
//! - `api`: HTTP-facing components.
//! - `core`: Core business logic.
//! - `integrations`: External service integrations.
//! - `config`: Configuration management.
//! - `csv_export`: CSV serialization of record sets.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `lookup_client`: Lookup API client.
//! - `mock`: Mock lookup generator.
//! - `models`: Lookup, request, and view models.
//! - `normalizer`: Response classification and summary extraction.
//! - `render`: HTML page rendering.

pub mod api;
pub mod core;
pub mod integrations;

pub mod config;
pub mod csv_export;
pub mod errors;
pub mod handlers;
pub mod lookup_client;
pub mod mock;
pub mod models;
pub mod normalizer;
pub mod render;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::handlers::AppState;

/// Largest accepted form submission.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Builds the application router.
///
/// Rate limiting is applied by the binary, which knows the peer addresses.
pub fn app(state: Arc<AppState>) -> Router {
    let page_routes = Router::new()
        .route("/", get(handlers::index).post(handlers::lookup))
        .layer(ServiceBuilder::new().layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(page_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
