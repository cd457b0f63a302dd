use interview_types::ErrorBody;
use reqwest::StatusCode;

// Prefer the service's `detail`; otherwise surface the status line as is.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message())
        .unwrap_or_else(|| status.to_string())
}
