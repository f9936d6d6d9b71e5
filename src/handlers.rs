use crate::config::Config;
use crate::csv_export::{csv_filename, to_csv};
use crate::errors::AppError;
use crate::lookup_client::LookupClient;
use crate::mock::mock_lookup;
use crate::models::*;
use crate::normalizer::{classify, is_absent};
use crate::render::{render_page, PageView};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Client for the remote lookup API.
    pub lookup_client: LookupClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let lookup_client = LookupClient::new(&config)?;
        Ok(Self {
            config,
            lookup_client,
        })
    }
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "numinfo",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /
///
/// Renders the empty lookup form. A `term` query parameter pre-fills the input.
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
) -> Html<String> {
    Html(render_page(&PageView {
        term: params.term.as_deref().unwrap_or(""),
        use_mock: false,
        api_key_from_env: state.config.api_key_from_env,
        outcome: None,
    }))
}

/// POST /
///
/// Runs one lookup (mock or remote) and renders the result, or returns it as
/// a CSV attachment when `download_csv` was submitted and there is data.
pub async fn lookup(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LookupForm>,
) -> Result<Response, AppError> {
    let term = form.term();
    tracing::info!(
        "POST / - term: {:?}, mock: {}, csv: {}",
        term,
        form.use_mock(),
        form.download_csv()
    );

    let outcome = run_lookup(&state, term, form.use_mock()).await;

    if form.download_csv() && !is_absent(&outcome.result) {
        return csv_response(term, &outcome.result);
    }

    Ok(Html(render_page(&PageView {
        term,
        use_mock: form.use_mock(),
        api_key_from_env: state.config.api_key_from_env,
        outcome: Some(&outcome),
    }))
    .into_response())
}

/// Resolves a term through the mock generator or the lookup client.
pub async fn run_lookup(state: &AppState, term: &str, use_mock: bool) -> LookupOutcome {
    if use_mock {
        return LookupOutcome::from_mock(Value::Object(mock_lookup(term)));
    }

    let result = state.lookup_client.fetch(term).await;
    if let LookupResult::Failure { ref message, .. } = result {
        tracing::error!("Lookup for '{}' failed: {}", term, message);
    }
    LookupOutcome::from_lookup(result)
}

/// Builds the CSV download response for a payload.
pub fn csv_response(term: &str, result: &Value) -> Result<Response, AppError> {
    let record_set = classify(result);
    let body = to_csv(&record_set);
    tracing::info!(
        "Exporting {} record(s) as CSV for term {:?}",
        record_set.len(),
        term
    );

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", csv_filename(term)),
        )
        .body(body.into())?;

    Ok(response)
}
