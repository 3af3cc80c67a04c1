//! Explicit schema validation of raw model output.
//!
//! The model's structured response is only *claimed* to satisfy the declared
//! schema. These functions are the application-side acceptance step: a raw
//! `serde_json::Value` either decodes into the typed record or becomes a
//! [`ModelError::SchemaViolation`]. No caller may touch model output fields
//! except through a record returned here.

use crate::ModelError;
use serde_json::Value;
use tdr_types::{Analysis, Bid, Rfp};

/// Decodes extraction-stage output into an [`Rfp`].
pub fn decode_rfp(value: Value) -> Result<Rfp, ModelError> {
    decode("RFP", value)
}

/// Decodes assessment-stage output into a [`Bid`].
pub fn decode_bid(value: Value) -> Result<Bid, ModelError> {
    decode("bid", value)
}

/// Decodes analysis-stage output into an [`Analysis`].
pub fn decode_analysis(value: Value) -> Result<Analysis, ModelError> {
    decode("analysis", value)
}

fn decode<T: serde::de::DeserializeOwned>(kind: &str, value: Value) -> Result<T, ModelError> {
    serde_json::from_value(value).map_err(|e| ModelError::SchemaViolation {
        message: format!("{kind} output: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_rfp_success() {
        let value = json!({
            "title": "Acme Office Renovation",
            "rawText": "Renovation of...",
            "requirements": [
                {"text": "Must use licensed contractor", "category": "Compliance"}
            ]
        });
        let rfp = decode_rfp(value).unwrap();
        assert_eq!(rfp.title, "Acme Office Renovation");
        assert_eq!(rfp.requirements.len(), 1);
    }

    #[test]
    fn test_decode_rfp_missing_field_is_schema_violation() {
        let value = json!({"title": "Acme", "requirements": []});
        let err = decode_rfp(value).unwrap_err();
        assert!(matches!(err, ModelError::SchemaViolation { .. }));
        assert!(err.to_string().contains("RFP output"));
    }

    #[test]
    fn test_decode_bid_success() {
        let value = json!({
            "title": "BuildCo Proposal",
            "rawText": "...",
            "totalCost": 420000,
            "timeline": "4 months",
            "requirements": [
                {
                    "text": "Must use licensed contractor",
                    "category": "Compliance",
                    "isSatisfied": true,
                    "reason": "Holds state license #12345"
                }
            ]
        });
        let bid = decode_bid(value).unwrap();
        assert_eq!(bid.total_cost, 420_000.0);
        assert!(bid.requirements[0].is_satisfied);
    }

    #[test]
    fn test_decode_bid_wrong_type_is_schema_violation() {
        let value = json!({
            "title": "BuildCo",
            "rawText": "...",
            "totalCost": "a lot",
            "timeline": "4 months",
            "requirements": []
        });
        assert!(matches!(
            decode_bid(value),
            Err(ModelError::SchemaViolation { .. })
        ));
    }

    #[test]
    fn test_decode_analysis_success() {
        let value = json!({
            "recommendation": "BuildCo Proposal",
            "mainRecommendationReason": "Best value",
            "supportingRecommendationPoints": ["Licensed", "On budget"],
            "openQuestions": [
                {"companyName": "BuildCo", "openQuestions": ["Confirm start date"]}
            ]
        });
        let analysis = decode_analysis(value).unwrap();
        assert_eq!(analysis.open_questions[0].company_name, "BuildCo");
    }

    #[test]
    fn test_decode_analysis_rejects_non_object() {
        assert!(matches!(
            decode_analysis(json!("just a string")),
            Err(ModelError::SchemaViolation { .. })
        ));
    }
}
