use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// ============ Lookup Models ============

/// Outcome of a single call to the lookup API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LookupResult {
    /// The call completed. `value` is the decoded body, or `{"raw": body}`
    /// when the body was not valid JSON.
    Success { value: Value, status: u16 },
    /// The call did not complete (timeout, DNS, connection refused, ...).
    Failure { message: String, status: Option<u16> },
}

impl LookupResult {
    /// HTTP status of the exchange, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            LookupResult::Success { status, .. } => Some(*status),
            LookupResult::Failure { status, .. } => *status,
        }
    }
}

// ============ Request Models ============

/// Form fields submitted by the lookup page.
///
/// `use_mock` and `download_csv` are presence flags: any submitted value
/// turns them on, as an HTML checkbox or named submit button would.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupForm {
    #[serde(default)]
    pub term: Option<String>,
    #[serde(default)]
    pub use_mock: Option<String>,
    #[serde(default)]
    pub download_csv: Option<String>,
}

impl LookupForm {
    pub fn term(&self) -> &str {
        self.term.as_deref().unwrap_or("")
    }

    pub fn use_mock(&self) -> bool {
        self.use_mock.is_some()
    }

    pub fn download_csv(&self) -> bool {
        self.download_csv.is_some()
    }
}

/// Query parameters accepted by `GET /`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub term: Option<String>,
}

// ============ View Models ============

/// Everything the page needs to render the result of one lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupOutcome {
    /// Payload to display and export.
    pub result: Value,
    /// HTTP status of the upstream call (200 in mock mode).
    pub status: Option<u16>,
    /// Transport error message, when the upstream call failed.
    pub error: Option<String>,
}

impl LookupOutcome {
    /// Outcome for a record produced by the mock generator.
    pub fn from_mock(record: Value) -> Self {
        Self {
            result: record,
            status: Some(200),
            error: None,
        }
    }

    /// Outcome for a real lookup. A failed call keeps its message and shows
    /// `{"error": "No data"}` as the payload.
    pub fn from_lookup(lookup: LookupResult) -> Self {
        match lookup {
            LookupResult::Success { value, status } => Self {
                result: value,
                status: Some(status),
                error: None,
            },
            LookupResult::Failure { message, status } => Self {
                result: json!({ "error": "No data" }),
                status,
                error: Some(message),
            },
        }
    }
}
