use serde_json::Value;

/// Returns `true` for any 2xx status.
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Returns `true` if `status` is one of the statuses `retry_statuses` lists.
///
/// ```
/// use strata_fetch::is_retryable_status;
///
/// let statuses = [429, 500, 502, 503, 504];
/// assert!(is_retryable_status(503, &statuses));
/// assert!(!is_retryable_status(404, &statuses));
/// ```
pub fn is_retryable_status(status: u16, retry_statuses: &[u16]) -> bool {
    retry_statuses.contains(&status)
}

/// Joins the configured base address and an endpoint name.
///
/// A trailing slash on the base is not doubled. The name is used as-is.
pub fn endpoint_url(base: &str, endpoint: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), endpoint)
}

/// Short name of a JSON value's top-level type, for error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
