// Stage Domain Model
//
// The pipeline is a fixed, linear sequence of five stages. Ordering,
// queue routing and artifact key derivation are all static: they are
// exhaustively enumerated here rather than expressed through dynamic
// configuration, since the whole point of this orchestrator is to run
// one shape of pipeline reliably.

use serde::{Deserialize, Serialize};

/// One of the five canonical pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Research,
    ProductManager,
    Drawer,
    Designer,
    Coder,
}

/// Canonical stage order. `completed_stages` on a Job is always a prefix
/// of this slice.
pub const STAGE_ORDER: [Stage; 5] = [
    Stage::Research,
    Stage::ProductManager,
    Stage::Drawer,
    Stage::Designer,
    Stage::Coder,
];

impl Stage {
    /// The token used on the wire (task messages, queue names) and as the
    /// write-side artifact key segment. Always underscore form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Research => "research",
            Stage::ProductManager => "product_manager",
            Stage::Drawer => "drawer",
            Stage::Designer => "designer",
            Stage::Coder => "coder",
        }
    }

    /// Parse a stage token, accepting both the underscore form used by
    /// task messages and the hyphen form that shows up in some historical
    /// artifact keys for `product_manager` (see DESIGN.md).
    pub fn parse(token: &str) -> Option<Stage> {
        match token {
            "research" => Some(Stage::Research),
            "product_manager" | "product-manager" => Some(Stage::ProductManager),
            "drawer" => Some(Stage::Drawer),
            "designer" => Some(Stage::Designer),
            "coder" => Some(Stage::Coder),
            _ => None,
        }
    }

    /// Index of this stage within the canonical order (0-based).
    pub fn position(&self) -> usize {
        STAGE_ORDER.iter().position(|s| s == self).expect("stage in STAGE_ORDER")
    }

    /// Stage that follows this one, or `None` if this is the last stage.
    pub fn next(&self) -> Option<Stage> {
        STAGE_ORDER.get(self.position() + 1).copied()
    }

    /// Stage that precedes this one, or `None` if this is the first stage.
    pub fn prev(&self) -> Option<Stage> {
        self.position().checked_sub(1).and_then(|i| STAGE_ORDER.get(i).copied())
    }

    /// Name of the queue this stage's task messages are dispatched to.
    pub fn queue_name(&self) -> &'static str {
        self.as_str()
    }

    /// Blob key for the input payload dispatched to this stage.
    pub fn input_key(&self, job_id: &str) -> String {
        format!("{job_id}/{}.json", self.as_str())
    }

    /// Canonical (write-side) blob key for this stage's result.
    pub fn result_key(&self, job_id: &str) -> String {
        format!("{job_id}/{}-result.json", self.as_str())
    }

    /// Alternate accepted read-side key for this stage's result, if one
    /// exists (only `product_manager` has a hyphenated historical form).
    pub fn alternate_result_key(&self, job_id: &str) -> Option<String> {
        match self {
            Stage::ProductManager => Some(format!("{job_id}/product-manager-result.json")),
            _ => None,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_is_fixed_and_total() {
        assert_eq!(STAGE_ORDER.len(), 5);
        assert_eq!(STAGE_ORDER[0], Stage::Research);
        assert_eq!(STAGE_ORDER[4], Stage::Coder);
    }

    #[test]
    fn next_walks_the_chain_and_terminates() {
        assert_eq!(Stage::Research.next(), Some(Stage::ProductManager));
        assert_eq!(Stage::ProductManager.next(), Some(Stage::Drawer));
        assert_eq!(Stage::Drawer.next(), Some(Stage::Designer));
        assert_eq!(Stage::Designer.next(), Some(Stage::Coder));
        assert_eq!(Stage::Coder.next(), None);
    }

    #[test]
    fn prev_walks_the_chain_backwards_and_terminates() {
        assert_eq!(Stage::Research.prev(), None);
        assert_eq!(Stage::ProductManager.prev(), Some(Stage::Research));
        assert_eq!(Stage::Coder.prev(), Some(Stage::Designer));
    }

    #[test]
    fn parse_accepts_both_product_manager_spellings() {
        assert_eq!(Stage::parse("product_manager"), Some(Stage::ProductManager));
        assert_eq!(Stage::parse("product-manager"), Some(Stage::ProductManager));
        assert_eq!(Stage::parse("bogus"), None);
    }

    #[test]
    fn keys_use_underscore_form_on_write() {
        assert_eq!(Stage::ProductManager.result_key("j1"), "j1/product_manager-result.json");
        assert_eq!(
            Stage::ProductManager.alternate_result_key("j1"),
            Some("j1/product-manager-result.json".to_string())
        );
        assert_eq!(Stage::Research.alternate_result_key("j1"), None);
    }
}
