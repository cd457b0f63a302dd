/// Error body returned by the service on non-2xx responses.
///
/// `detail` is usually a string. Request validation failures send a list of
/// objects instead, which is kept as raw JSON.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn new(detail: &str) -> Self {
        Self {
            detail: Some(serde_json::Value::String(detail.to_string())),
        }
    }

    /// Human-readable form of `detail`, if there is one.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) if s.trim().is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .map(|item| match item.get("msg").and_then(|m| m.as_str()) {
                        Some(msg) => msg.to_string(),
                        None => item.to_string(),
                    })
                    .collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join("; "))
                }
            }
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_used_verbatim() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail": "Interview not found."}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("Interview not found."));
    }

    #[test]
    fn validation_detail_list_is_joined() {
        let raw = r#"{"detail": [
            {"loc": ["body", "role"], "msg": "field required", "type": "value_error.missing"},
            {"loc": ["body", "experience"], "msg": "field required", "type": "value_error.missing"}
        ]}"#;
        let body: ErrorBody = serde_json::from_str(raw).unwrap();
        assert_eq!(
            body.message().as_deref(),
            Some("field required; field required")
        );
    }

    #[test]
    fn missing_or_blank_detail_has_no_message() {
        let body: ErrorBody = serde_json::from_str(r#"{}"#).unwrap();
        assert!(body.message().is_none());
        let body: ErrorBody = serde_json::from_str(r#"{"detail": "  "}"#).unwrap();
        assert!(body.message().is_none());
    }
}
