/// HTML rendering for the lookup page.
///
/// The page is a single document: the lookup form, then (after a submission)
/// the summary cards next to the raw JSON payload. Every dynamic value goes
/// through [`escape_html`].
use crate::models::LookupOutcome;
use crate::normalizer::{classify, display_value, is_absent, summary_fields};
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write;

const LIGHT_THEME: &str = "https://cdn.jsdelivr.net/npm/bootswatch@5.3.3/dist/flatly/bootstrap.min.css";
const DARK_THEME: &str = "https://cdn.jsdelivr.net/npm/bootswatch@5.3.3/dist/darkly/bootstrap.min.css";

/// Inputs for one render of the page.
#[derive(Debug, Clone, Default)]
pub struct PageView<'a> {
    pub term: &'a str,
    pub use_mock: bool,
    /// False shows the fallback API key warning.
    pub api_key_from_env: bool,
    /// Present once a lookup was submitted.
    pub outcome: Option<&'a LookupOutcome>,
}

/// Escapes `& < > " '` for use in element content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Card label for a field: first letter upper-cased.
fn field_label(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Pretty-prints JSON with four-space indentation.
pub fn pretty_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    match value.serialize(&mut serializer) {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(_) => value.to_string(),
    }
}

/// Summary column: one card per standard field, or a notice.
pub fn render_summary(result: &Value) -> String {
    if is_absent(result) {
        return r#"<div class="alert alert-secondary">No data</div>"#.to_string();
    }

    let record_set = classify(result);
    let fields = summary_fields(&record_set);
    if fields.is_empty() {
        return r#"<div class="alert alert-info">No standard fields found. See raw JSON.</div>"#
            .to_string();
    }

    let mut html = String::new();
    for (field, value) in fields {
        let _ = write!(
            html,
            r#"<div class="card-compact border"><div class="key">{}</div><div class="val">{}</div></div>"#,
            escape_html(&field_label(field)),
            escape_html(&display_value(value)),
        );
    }
    html
}

fn render_results(outcome: &LookupOutcome) -> String {
    let mut html = String::new();
    html.push_str(r#"<div class="row"><div class="col-lg-8"><h5>Summary</h5>"#);
    if let Some(ref error) = outcome.error {
        let _ = write!(
            html,
            r#"<div class="alert alert-danger">{}</div>"#,
            escape_html(error)
        );
    }
    html.push_str(&render_summary(&outcome.result));
    html.push_str("</div>");

    let _ = write!(
        html,
        r#"<div class="col-lg-4"><h5>Raw JSON</h5><pre class="json-box">{}</pre>"#,
        escape_html(&pretty_json(&outcome.result))
    );
    if let Some(status) = outcome.status.filter(|s| *s != 0) {
        let _ = write!(
            html,
            r#"<small class="text-muted">HTTP Status: {}</small>"#,
            status
        );
    }
    html.push_str("</div></div>");
    html
}

/// Renders the complete page.
pub fn render_page(view: &PageView<'_>) -> String {
    let warning = if view.api_key_from_env {
        String::new()
    } else {
        format!(
            r#"<div class="alert alert-warning">Environment variable <code>API_KEY</code> not set. Using fallback key <b>{}</b>.</div>"#,
            escape_html(crate::config::FALLBACK_API_KEY)
        )
    };
    let checked = if view.use_mock { "checked" } else { "" };
    let results = view.outcome.map(render_results).unwrap_or_default();

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>NumInfo</title>
<meta name="viewport" content="width=device-width, initial-scale=1">
<link id="theme-link" rel="stylesheet" href="{light}">
<style>
.card-compact{{padding:12px;border-radius:10px;box-shadow:0 4px 10px rgba(0,0,0,0.15);margin-bottom:8px;}}
.key{{font-weight:700;color:#0d6efd;}}
.val{{font-weight:500;}}
pre.json-box{{background:#f8f9fa;border-radius:8px;padding:12px;overflow:auto;max-height:380px;}}
footer{{margin-top:2rem;text-align:center;font-size:0.9rem;opacity:0.8;}}
</style>
</head>
<body>
<div class="container py-4">
  <div class="d-flex justify-content-between align-items-center mb-4">
    <h2>NumInfo</h2>
    <div><button id="toggleTheme" class="btn btn-outline-secondary btn-sm">Toggle Theme</button></div>
  </div>
  {warning}
  <form method="post" class="card p-3 shadow-sm mb-4">
    <div class="row g-3 align-items-end">
      <div class="col-md-8">
        <label class="form-label" for="term">Enter term / phone number</label>
        <input type="text" name="term" id="term" value="{term}" placeholder="+919876543210" class="form-control">
      </div>
      <div class="col-md-2 form-check text-center">
        <input class="form-check-input" type="checkbox" name="use_mock" id="use_mock" {checked}>
        <label class="form-check-label" for="use_mock">Mock mode</label>
      </div>
      <div class="col-md-2 text-end">
        <button class="btn btn-primary" type="submit">Lookup</button>
        <button class="btn btn-outline-success mt-2" name="download_csv" value="1">CSV</button>
      </div>
    </div>
  </form>
  {results}
  <footer class="mt-4">API key loaded from environment (<code>API_KEY</code>)</footer>
</div>
<script>
const themeLink = document.getElementById('theme-link');
const toggleBtn = document.getElementById('toggleTheme');
const themes = {{ light: "{light}", dark: "{dark}" }};
function applyTheme(theme) {{
  themeLink.href = themes[theme];
  localStorage.setItem('theme', theme);
}}
applyTheme(localStorage.getItem('theme') || 'light');
toggleBtn.addEventListener('click', () => {{
  applyTheme(localStorage.getItem('theme') === 'dark' ? 'light' : 'dark');
}});
</script>
</body>
</html>
"#,
        light = LIGHT_THEME,
        dark = DARK_THEME,
        warning = warning,
        term = escape_html(view.term),
        checked = checked,
        results = results,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#039;&amp;&#039;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_field_label() {
        assert_eq!(field_label("fname"), "Fname");
        assert_eq!(field_label("id"), "Id");
        assert_eq!(field_label(""), "");
    }

    #[test]
    fn test_summary_cards() {
        let html = render_summary(&json!({"mobile": "123", "name": "<b>A</b>"}));
        let name_at = html.find(">Name<").unwrap();
        let mobile_at = html.find(">Mobile<").unwrap();
        assert!(name_at < mobile_at);
        assert!(html.contains("&lt;b&gt;A&lt;/b&gt;"));
    }

    #[test]
    fn test_summary_notices() {
        assert!(render_summary(&json!(null)).contains("No data"));
        assert!(render_summary(&json!([])).contains("No data"));
        assert!(render_summary(&json!({"raw": "oops"})).contains("No standard fields found"));
        assert!(render_summary(&json!("text")).contains("No standard fields found"));
    }

    #[test]
    fn test_pretty_json_keeps_slashes() {
        let text = pretty_json(&json!({"url": "https://a/b"}));
        assert_eq!(text, "{\n    \"url\": \"https://a/b\"\n}");
    }

    #[test]
    fn test_page_without_outcome() {
        let html = render_page(&PageView {
            term: "\"x\"",
            use_mock: true,
            api_key_from_env: false,
            outcome: None,
        });
        assert!(html.contains(r#"value="&quot;x&quot;""#));
        assert!(html.contains("checked"));
        assert!(html.contains("not set"));
        assert!(!html.contains("Raw JSON"));
    }

    #[test]
    fn test_page_with_failure() {
        let outcome = LookupOutcome {
            result: json!({"error": "No data"}),
            status: None,
            error: Some("Request error: timed out".to_string()),
        };
        let html = render_page(&PageView {
            term: "1",
            use_mock: false,
            api_key_from_env: true,
            outcome: Some(&outcome),
        });
        assert!(html.contains("Request error: timed out"));
        assert!(html.contains("No standard fields found"));
        assert!(!html.contains("HTTP Status"));
        assert!(!html.contains("not set"));
    }
}
