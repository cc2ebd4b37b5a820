use serde::{Deserialize, Serialize};

/// 2xx body of the signup and unregister endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub message: String,
}

/// Non-2xx body of the signup and unregister endpoints. The server may
/// omit `detail` (or the whole body); callers fall back to generic text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_outcome_decodes_message() {
        let outcome: ActionOutcome =
            serde_json::from_str(r#"{"message":"Signed up test@mergington.edu for Chess Club"}"#)
                .expect("outcome json");
        assert!(outcome.message.contains("Chess Club"));
    }

    #[test]
    fn error_detail_tolerates_missing_field() {
        let with: ErrorDetail =
            serde_json::from_str(r#"{"detail":"Already signed up"}"#).expect("detail json");
        assert_eq!(with.detail.as_deref(), Some("Already signed up"));

        let without: ErrorDetail = serde_json::from_str("{}").expect("empty json");
        assert_eq!(without.detail, None);
    }
}
