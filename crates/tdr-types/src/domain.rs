//! Domain records for the tender review workflow.
//!
//! These are the shapes produced by the three model-mediated stages and
//! accumulated into a [`Project`]. Field names serialise in camelCase: the
//! same spelling is used in the model output schemas, the durable project
//! store, and the REST responses, so a record decoded at the model boundary
//! is returned to clients without renaming.
//!
//! All records are immutable once produced — a project only ever grows by
//! appending whole records (or is cleared wholesale on reset).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single requirement extracted from an RFP document.
///
/// Identity is positional within the owning RFP's requirement list; no
/// separate identifier is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    /// The requirement as stated in the RFP
    pub text: String,
    /// Broad classification, e.g. "Compliance" or "Financial"
    pub category: String,
}

/// A bid's verdict on one RFP requirement.
///
/// `text` and `category` are expected to echo the corresponding RFP
/// requirement, but they are independently generated by the model, so they
/// must never be used as a join key back to the RFP list. Correlation, where
/// needed, is by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssessedRequirement {
    /// The requirement text, echoed by the model
    pub text: String,
    /// The requirement category, echoed by the model
    pub category: String,
    /// Whether the bid satisfies this requirement
    pub is_satisfied: bool,
    /// The model's rationale for the verdict
    pub reason: String,
}

/// A Request for Proposal, as extracted from an uploaded PDF.
///
/// Created once per project by the extraction stage and never mutated;
/// discarded only on project reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rfp {
    /// Document title
    pub title: String,
    /// Full text content recovered from the document
    pub raw_text: String,
    /// Ordered requirement list; order is the requirements' identity
    pub requirements: Vec<Requirement>,
}

/// A vendor's bid, assessed against the RFP's requirements.
///
/// One instance per uploaded bid document. The `requirements` list is the
/// model's assessment and its length is *not* guaranteed to match the RFP's
/// requirement count — that is a trust boundary on the model's output, not
/// a verified invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    /// Bid title, typically the vendor or proposal name
    pub title: String,
    /// Full text content recovered from the document
    pub raw_text: String,
    /// Total quoted cost
    pub total_cost: f64,
    /// Delivery timeline as stated in the bid, e.g. "4 months"
    pub timeline: String,
    /// Per-requirement satisfaction verdicts, in the model's order
    pub requirements: Vec<AssessedRequirement>,
}

/// Open questions the analysis raises for one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyQuestions {
    /// The company the questions are addressed to
    pub company_name: String,
    /// Questions to resolve before awarding
    pub open_questions: Vec<String>,
}

/// The cross-bid recommendation produced by the comparative analysis stage.
///
/// At most one per project; re-running the analysis replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Which bid is recommended
    pub recommendation: String,
    /// The main reason for the recommendation
    pub main_recommendation_reason: String,
    /// Supporting points, in presentation order
    pub supporting_recommendation_points: Vec<String>,
    /// Open questions grouped per company
    pub open_questions: Vec<CompanyQuestions>,
}

/// The aggregate root: one RFP, its bids, and at most one analysis.
///
/// Invariants (enforced by the orchestrator, not by this type):
/// - `bids` is non-empty only if `rfp` is present
/// - `analysis` is present only if `bids` is non-empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// The extracted RFP, if one has been loaded
    pub rfp: Option<Rfp>,
    /// Assessed bids in upload order; append-only
    pub bids: Vec<Bid>,
    /// The latest comparative analysis, if one has been run
    pub analysis: Option<Analysis>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rfp() -> Rfp {
        Rfp {
            title: "Acme Office Renovation".into(),
            raw_text: "Renovation of the Acme head office...".into(),
            requirements: vec![
                Requirement {
                    text: "Must use licensed contractor".into(),
                    category: "Compliance".into(),
                },
                Requirement {
                    text: "Budget under $500k".into(),
                    category: "Financial".into(),
                },
            ],
        }
    }

    #[test]
    fn test_rfp_serialises_camel_case() {
        let json = serde_json::to_value(sample_rfp()).unwrap();
        assert!(json.get("rawText").is_some());
        assert_eq!(json["requirements"][0]["category"], "Compliance");
    }

    #[test]
    fn test_bid_round_trip() {
        let bid = Bid {
            title: "BuildCo Proposal".into(),
            raw_text: "BuildCo proposes...".into(),
            total_cost: 420_000.0,
            timeline: "4 months".into(),
            requirements: vec![AssessedRequirement {
                text: "Must use licensed contractor".into(),
                category: "Compliance".into(),
                is_satisfied: true,
                reason: "Bid states BuildCo holds state license #12345".into(),
            }],
        };
        let json = serde_json::to_string(&bid).unwrap();
        assert!(json.contains("\"totalCost\":420000.0"));
        assert!(json.contains("\"isSatisfied\":true"));
        let back: Bid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bid);
    }

    #[test]
    fn test_project_default_is_empty() {
        let project = Project::default();
        assert!(project.rfp.is_none());
        assert!(project.bids.is_empty());
        assert!(project.analysis.is_none());
    }

    #[test]
    fn test_analysis_round_trip() {
        let analysis = Analysis {
            recommendation: "BuildCo Proposal".into(),
            main_recommendation_reason: "Best satisfaction ratio within budget".into(),
            supporting_recommendation_points: vec!["Licensed contractor".into()],
            open_questions: vec![CompanyQuestions {
                company_name: "BuildCo".into(),
                open_questions: vec!["Confirm start date".into()],
            }],
        };
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["openQuestions"][0]["companyName"], "BuildCo");
        let back: Analysis = serde_json::from_value(json).unwrap();
        assert_eq!(back, analysis);
    }
}
