use serde_json::Value;

use crate::error::AttemptFailure;

pub const REGISTER_PATH: &str = "/register";

/// Error body returned by the registration service on a non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterErrorResponse {
    pub error: Option<String>,
}

impl RegisterErrorResponse {
    /// Pulls a string `error` field out of an arbitrary JSON body.
    pub fn from_body(body: &Value) -> Self {
        Self {
            error: body
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}

/// Outcome of one transport call, consumed exactly once by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptResult {
    Success(Value),
    Failure(AttemptFailure),
}

impl AttemptResult {
    pub fn is_success(&self) -> bool {
        matches!(self, AttemptResult::Success(_))
    }

    pub fn failure(&self) -> Option<&AttemptFailure> {
        match self {
            AttemptResult::Success(_) => None,
            AttemptResult::Failure(failure) => Some(failure),
        }
    }
}

impl From<AttemptFailure> for AttemptResult {
    fn from(value: AttemptFailure) -> Self {
        AttemptResult::Failure(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn error_field_is_only_taken_when_it_is_a_string() {
        assert_eq!(
            RegisterErrorResponse::from_body(&json!({"error": "duplicate email"})).error,
            Some("duplicate email".to_string())
        );
        assert_eq!(
            RegisterErrorResponse::from_body(&json!({"error": {"code": 7}})).error,
            None
        );
        assert_eq!(RegisterErrorResponse::from_body(&json!([1, 2])).error, None);
    }
}
