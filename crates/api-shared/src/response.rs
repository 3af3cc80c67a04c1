use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON error body returned by every failing endpoint.
///
/// The status-code class carries the error classification (client input vs
/// processing failure); this body carries the specific constraint or cause.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    /// What went wrong
    pub message: String,
}

impl ErrorRes {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_res_carries_message() {
        let res = ErrorRes::new("no file provided");
        assert_eq!(res.message, "no file provided");
    }
}
