//! Submission Intake (SI) — the one admission contract shared by the HTTP
//! POST handler and the submissions-queue consumer. Both paths validate a
//! brief identically and funnel into the same `PipelineController::admit`
//! call; duplicated validation between the two transports is exactly what
//! this module exists to avoid (SPEC_FULL.md §9).

use crate::domain::Brief;
use crate::error::{AppError, Result};

const MAX_FIELD_LEN: usize = 2048;

/// Validate a submitted brief. Both `product` and `audience` are required
/// and non-empty; `tone` is optional and unconstrained beyond length.
pub fn validate_brief(brief: &Brief) -> Result<()> {
    if brief.product.trim().is_empty() {
        return Err(AppError::Validation("product is required".to_string()));
    }
    if brief.audience.trim().is_empty() {
        return Err(AppError::Validation("audience is required".to_string()));
    }
    if brief.product.len() > MAX_FIELD_LEN {
        return Err(AppError::Validation(format!(
            "product too long (max {MAX_FIELD_LEN} chars)"
        )));
    }
    if brief.audience.len() > MAX_FIELD_LEN {
        return Err(AppError::Validation(format!(
            "audience too long (max {MAX_FIELD_LEN} chars)"
        )));
    }
    if let Some(tone) = &brief.tone {
        if tone.len() > MAX_FIELD_LEN {
            return Err(AppError::Validation(format!("tone too long (max {MAX_FIELD_LEN} chars)")));
        }
    }
    Ok(())
}
