//! Output schemas for the three stage calls.
//!
//! These are Gemini `responseSchema` declarations (the API's OpenAPI-derived
//! subset: `type`, `properties`, `required`, `items`, `description`, with
//! upper-case type names). They are the contract a stage's model response
//! must satisfy; anything the schema does not pin down is unvalidated model
//! territory and must go through [`crate::decode`] before use.

use serde_json::{json, Value};

/// Schema for the extraction stage: `{title, rawText, requirements[]}`.
pub fn rfp_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING", "description": "Title of the RFP document" },
            "rawText": { "type": "STRING", "description": "Full text content of the document" },
            "requirements": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "text": { "type": "STRING", "description": "The requirement as stated" },
                        "category": { "type": "STRING", "description": "Short category label" }
                    },
                    "required": ["text", "category"]
                }
            }
        },
        "required": ["title", "rawText", "requirements"]
    })
}

/// Schema for the assessment stage:
/// `{title, rawText, totalCost, timeline, requirements[]}`.
pub fn bid_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING", "description": "Title of the bid or vendor name" },
            "rawText": { "type": "STRING", "description": "Full text content of the document" },
            "totalCost": { "type": "NUMBER", "description": "Total quoted cost" },
            "timeline": { "type": "STRING", "description": "Proposed delivery timeline" },
            "requirements": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "text": { "type": "STRING", "description": "The RFP requirement, echoed" },
                        "category": { "type": "STRING", "description": "The requirement category, echoed" },
                        "isSatisfied": { "type": "BOOLEAN", "description": "Whether the bid satisfies it" },
                        "reason": { "type": "STRING", "description": "Rationale for the verdict" }
                    },
                    "required": ["text", "category", "isSatisfied", "reason"]
                }
            }
        },
        "required": ["title", "rawText", "totalCost", "timeline", "requirements"]
    })
}

/// Schema for the comparative analysis stage:
/// `{recommendation, mainRecommendationReason, supportingRecommendationPoints[], openQuestions[]}`.
pub fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recommendation": { "type": "STRING", "description": "Which bid is recommended" },
            "mainRecommendationReason": { "type": "STRING", "description": "The main reason for the recommendation" },
            "supportingRecommendationPoints": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "openQuestions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "companyName": { "type": "STRING" },
                        "openQuestions": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" }
                        }
                    },
                    "required": ["companyName", "openQuestions"]
                }
            }
        },
        "required": [
            "recommendation",
            "mainRecommendationReason",
            "supportingRecommendationPoints",
            "openQuestions"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required_fields(schema: &Value) -> Vec<&str> {
        schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect()
    }

    #[test]
    fn test_rfp_schema_requires_all_fields() {
        assert_eq!(
            required_fields(&rfp_schema()),
            vec!["title", "rawText", "requirements"]
        );
    }

    #[test]
    fn test_bid_schema_requires_verdict_fields() {
        let schema = bid_schema();
        let item_required: Vec<&str> = schema["properties"]["requirements"]["items"]["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(item_required, vec!["text", "category", "isSatisfied", "reason"]);
    }

    #[test]
    fn test_analysis_schema_nests_company_questions() {
        let schema = analysis_schema();
        assert_eq!(
            schema["properties"]["openQuestions"]["items"]["properties"]["companyName"]["type"],
            "STRING"
        );
    }
}
