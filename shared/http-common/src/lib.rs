//! Shared HTTP utilities for the Secure Form workspace.
//!
//! Provides JSON error bodies, HTML escaping, and query-string helpers used
//! by the form-server pages and API.

// ============================================================================
// JSON Response Helpers (framework-agnostic)
// ============================================================================

/// Create a structured error JSON with a default message based on the code.
///
/// Returns: `{"error": {"code": "<code>", "message": "<default message>"}}`
pub fn json_err(code: &str) -> serde_json::Value {
    let message = match code {
        "not_found" => "Resource not found",
        "bad_request" => "Bad request",
        "validation_rejected" => "Input rejected",
        "error" | "internal" => "Internal server error",
        _ => code, // Fallback to code as message for unknown codes
    };
    serde_json::json!({"error": {"code": code, "message": message}})
}

/// Create a structured error JSON with a custom message.
///
/// Returns: `{"error": {"code": "<code>", "message": "<message>"}}`
pub fn json_error_with_message(code: &str, message: &str) -> serde_json::Value {
    serde_json::json!({"error": {"code": code, "message": message}})
}

// ============================================================================
// HTML
// ============================================================================

/// Escape text for use in HTML element content and quoted attributes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

// ============================================================================
// URL Building
// ============================================================================

/// Build `path?name=value` with the value percent-encoded.
pub fn url_with_query(path: &str, name: &str, value: &str) -> String {
    format!("{}?{}={}", path, name, urlencoding::encode(value))
}

// ============================================================================
// Query Parsing
// ============================================================================

/// Parse a named query parameter from a query string.
///
/// Returns `Some(value)` for the first occurrence of `name`, percent- and
/// `+`-decoded. A key without `=` yields an empty value. Undecodable values
/// are treated as absent.
pub fn parse_query_param(query: Option<&str>, name: &str) -> Option<String> {
    let q = query?;
    for pair in q.split('&') {
        let mut it = pair.splitn(2, '=');
        let key = it.next()?;
        if key == name {
            let val = it.next().unwrap_or("").replace('+', " ");
            return urlencoding::decode(&val).ok().map(|v| v.into_owned());
        }
    }
    None
}
