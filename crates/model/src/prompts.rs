//! Fixed stage instructions and the textual blocks they embed.
//!
//! Prompt text is part of each stage's contract: the assessment instruction
//! embeds the RFP requirements as a 1-based enumerated block in their
//! original order, and the analysis instruction embeds one summary per bid
//! plus the RFP's own requirement list. Rendering lives here so the stage
//! code in `tdr-core` stays pure orchestration.

use tdr_types::{Bid, Requirement, Rfp};

/// Instruction for the extraction stage.
pub const EXTRACTION_INSTRUCTION: &str = "\
You are a procurement analyst. Read the attached Request for Proposal (RFP) \
document and extract: the document title, the full raw text content, and the \
complete list of requirements the RFP places on bidders. Give each \
requirement a short category label such as Compliance, Financial, Technical \
or Timeline. Keep requirement text close to the document's own wording and \
preserve the order in which requirements appear.";

/// Builds the instruction for the assessment stage.
///
/// Embeds the RFP requirements as an enumerated block; the model is asked to
/// return one verdict per listed requirement, in the same order.
pub fn assessment_instruction(requirements: &[Requirement]) -> String {
    format!(
        "You are a procurement analyst. Read the attached bid document and \
assess it against the RFP requirements listed below. Extract the bid title, \
the full raw text content, the total quoted cost and the proposed timeline. \
Then, for each listed requirement, state whether the bid satisfies it and \
give a short rationale. Echo each requirement's text and category and keep \
the requirements in the listed order.\n\nRFP requirements:\n{}",
        render_requirement_block(requirements)
    )
}

/// Builds the instruction for the comparative analysis stage.
///
/// No document is attached; everything the model needs — the RFP's
/// requirement list and one summary per bid — is rendered into the
/// instruction itself.
pub fn analysis_instruction(rfp: &Rfp, bids: &[Bid]) -> String {
    let summaries: Vec<String> = bids.iter().map(bid_summary).collect();

    format!(
        "You are advising a tender board. An RFP titled \"{}\" received {} \
bid(s), summarised below. Recommend which bid to accept, give the main \
reason and a list of supporting points, and list the open questions the \
board should put to each company before awarding. Produce exactly one open \
question entry per company.\n\nRFP requirements:\n{}\n\n{}",
        rfp.title,
        bids.len(),
        render_requirement_block(&rfp.requirements),
        summaries.join("\n\n"),
    )
}

/// Renders requirements as `"{i}. [{category}] {text}"` lines, 1-based,
/// original order preserved.
pub fn render_requirement_block(requirements: &[Requirement]) -> String {
    requirements
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. [{}] {}", i + 1, r.category, r.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the textual summary of one bid for the analysis instruction.
fn bid_summary(bid: &Bid) -> String {
    let satisfied = bid.requirements.iter().filter(|r| r.is_satisfied).count();
    let total = bid.requirements.len();

    let verdicts: Vec<String> = bid
        .requirements
        .iter()
        .map(|r| {
            let verdict = if r.is_satisfied {
                "satisfied"
            } else {
                "NOT satisfied"
            };
            format!("- [{}] {}: {} — {}", r.category, r.text, verdict, r.reason)
        })
        .collect();

    format!(
        "Bid: {}\nTotal cost: ${}\nTimeline: {}\nRequirements satisfied: {}/{} ({}%)\n{}",
        bid.title,
        format_cost(bid.total_cost),
        bid.timeline,
        satisfied,
        total,
        satisfaction_percent(satisfied, total),
        verdicts.join("\n"),
    )
}

/// Satisfaction ratio as a percentage rounded to the nearest integer.
///
/// A bid with zero requirements is treated as 0% rather than dividing by
/// zero.
pub fn satisfaction_percent(satisfied: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((satisfied as f64 / total as f64) * 100.0).round() as u32
}

/// Formats a cost with thousands separators, dropping a `.00` fraction.
pub fn format_cost(cost: f64) -> String {
    let negative = cost < 0.0;
    let cents = (cost.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let mut out = if fraction == 0 {
        grouped
    } else {
        format!("{}.{:02}", grouped, fraction)
    };
    if negative {
        out.insert(0, '-');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdr_types::AssessedRequirement;

    fn sample_requirements() -> Vec<Requirement> {
        vec![
            Requirement {
                text: "Must use licensed contractor".into(),
                category: "Compliance".into(),
            },
            Requirement {
                text: "Budget under $500k".into(),
                category: "Financial".into(),
            },
        ]
    }

    #[test]
    fn test_requirement_block_is_one_based_and_ordered() {
        let block = render_requirement_block(&sample_requirements());
        assert_eq!(
            block,
            "1. [Compliance] Must use licensed contractor\n2. [Financial] Budget under $500k"
        );
    }

    #[test]
    fn test_assessment_instruction_embeds_block() {
        let instruction = assessment_instruction(&sample_requirements());
        assert!(instruction.contains("1. [Compliance] Must use licensed contractor"));
        assert!(instruction.contains("listed order"));
    }

    #[test]
    fn test_satisfaction_percent_rounds() {
        assert_eq!(satisfaction_percent(1, 3), 33);
        assert_eq!(satisfaction_percent(2, 3), 67);
        assert_eq!(satisfaction_percent(2, 2), 100);
    }

    #[test]
    fn test_satisfaction_percent_zero_requirements() {
        assert_eq!(satisfaction_percent(0, 0), 0);
    }

    #[test]
    fn test_format_cost() {
        assert_eq!(format_cost(420000.0), "420,000");
        assert_eq!(format_cost(1234567.5), "1,234,567.50");
        assert_eq!(format_cost(999.0), "999");
        assert_eq!(format_cost(0.0), "0");
    }

    #[test]
    fn test_analysis_instruction_summarises_bids() {
        let rfp = Rfp {
            title: "Acme Office Renovation".into(),
            raw_text: "...".into(),
            requirements: sample_requirements(),
        };
        let bid = Bid {
            title: "BuildCo Proposal".into(),
            raw_text: "...".into(),
            total_cost: 420_000.0,
            timeline: "4 months".into(),
            requirements: vec![
                AssessedRequirement {
                    text: "Must use licensed contractor".into(),
                    category: "Compliance".into(),
                    is_satisfied: true,
                    reason: "Holds state license".into(),
                },
                AssessedRequirement {
                    text: "Budget under $500k".into(),
                    category: "Financial".into(),
                    is_satisfied: false,
                    reason: "Quote exceeds budget with contingency".into(),
                },
            ],
        };

        let instruction = analysis_instruction(&rfp, &[bid]);
        assert!(instruction.contains("Bid: BuildCo Proposal"));
        assert!(instruction.contains("Total cost: $420,000"));
        assert!(instruction.contains("Requirements satisfied: 1/2 (50%)"));
        assert!(instruction.contains("NOT satisfied"));
        assert!(instruction.contains("1. [Compliance] Must use licensed contractor"));
    }

    #[test]
    fn test_analysis_instruction_zero_requirement_bid() {
        let rfp = Rfp {
            title: "Acme".into(),
            raw_text: "...".into(),
            requirements: vec![],
        };
        let bid = Bid {
            title: "Empty Bid".into(),
            raw_text: "...".into(),
            total_cost: 100.0,
            timeline: "1 month".into(),
            requirements: vec![],
        };
        let instruction = analysis_instruction(&rfp, &[bid]);
        assert!(instruction.contains("Requirements satisfied: 0/0 (0%)"));
    }
}
