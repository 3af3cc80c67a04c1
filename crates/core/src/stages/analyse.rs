//! Comparative analysis stage: RFP + assessed bids → recommendation.

use crate::{CoreResult, ValidationError};
use tdr_model::{decode, prompts, schemas, ModelClient};
use tdr_types::{Analysis, Bid, Rfp};
use tracing::info;

/// Produces a cross-bid recommendation and per-company open questions.
///
/// No file I/O: the RFP's requirement list and a summary of every bid are
/// rendered into the instruction. Requires at least one bid.
pub async fn analyse_bids(
    model: &dyn ModelClient,
    rfp: &Rfp,
    bids: &[Bid],
) -> CoreResult<Analysis> {
    if bids.is_empty() {
        return Err(ValidationError::NoBids.into());
    }

    let instruction = prompts::analysis_instruction(rfp, bids);
    let analysis = model
        .generate_structured(&instruction, None, &schemas::analysis_schema())
        .await
        .and_then(decode::decode_analysis)?;

    info!(
        recommendation = %analysis.recommendation,
        companies = analysis.open_questions.len(),
        "produced comparative analysis"
    );
    Ok(analysis)
}
