//! Per-stage prompt constants.
//!
//! The instruction texts are opaque prompts consumed by the external stage
//! workers (research/product_manager/drawer/designer/coder); the
//! orchestrator treats them as literal constants bound per stage and never
//! inspects or transforms their content (SPEC_FULL.md §4.5).

use crate::domain::Stage;

pub fn instructions_for(stage: Stage) -> &'static str {
    match stage {
        Stage::Research => {
            "Research the product and audience described in the brief. Identify the \
             target market, competitive landscape, and the single strongest value \
             proposition to lead a landing page with."
        }
        Stage::ProductManager => {
            "Using the research findings, define the landing page's goals, key \
             messaging pillars, and the sections it must contain to convert the \
             target audience."
        }
        Stage::Drawer => {
            "Using the product brief, sketch the landing page's visual layout: \
             section ordering, hero composition, and the placement of calls to \
             action."
        }
        Stage::Designer => {
            "Using the layout sketch, produce a concrete visual design: color \
             palette, typography, spacing and component styling consistent with \
             the requested tone."
        }
        Stage::Coder => {
            "Using the design spec, generate the landing page's production code \
             artifact."
        }
    }
}

/// Combine a stage's upstream input (the brief for `research`, or the prior
/// stage's result artifact for everything else) with that stage's constant
/// instruction text to form the payload dispatched to the worker.
pub fn build_stage_input(stage: Stage, base: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "stage": stage.as_str(),
        "instructions": instructions_for(stage),
        "input": base,
    })
}
