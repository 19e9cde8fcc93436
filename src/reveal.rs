use crate::config::RevealGroup;

pub const REVEALED_CLASS: &str = "revealed";
pub const REVEALED_STYLE_ID: &str = "fx-revealed-style";
pub const REVEALED_RULE: &str =
    ".revealed { opacity: 1 !important; transform: translateY(0) translateX(0) !important; }";

/// Inline style a target carries until it is revealed.
#[derive(Clone, Debug, PartialEq)]
pub struct HiddenStyle {
    pub opacity: &'static str,
    pub transform: String,
    pub transition: String,
}

pub fn stagger_delay(index: usize, step_s: f64) -> f64 {
    index as f64 * step_s
}

impl HiddenStyle {
    pub fn for_target(group: &RevealGroup, index: usize) -> Self {
        let duration = group.duration_s;
        let transition = if group.stagger_s > 0.0 {
            let delay = stagger_delay(index, group.stagger_s);
            format!("opacity {duration}s ease {delay}s, transform {duration}s ease {delay}s")
        } else {
            format!("opacity {duration}s ease, transform {duration}s ease")
        };

        Self {
            opacity: "0",
            transform: format!("translateY({}px)", group.offset_px),
            transition,
        }
    }
}

/// True when a `class` attribute already carries the revealed marker.
pub fn already_revealed(class_attr: Option<&str>) -> bool {
    class_attr.is_some_and(|classes| {
        classes
            .split_ascii_whitespace()
            .any(|class| class == REVEALED_CLASS)
    })
}

/// One-shot bookkeeping: each registered target can be revealed at most once.
#[derive(Clone, Debug, Default)]
pub struct RevealLedger {
    revealed: Vec<bool>,
}

impl RevealLedger {
    pub fn with_targets(count: usize) -> Self {
        Self {
            revealed: vec![false; count],
        }
    }

    pub fn target_count(&self) -> usize {
        self.revealed.len()
    }

    /// Returns true only on the first intersection of `index`.
    pub fn mark(&mut self, index: usize) -> bool {
        match self.revealed.get_mut(index) {
            Some(seen) if !*seen => {
                *seen = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    pub fn pending(&self) -> usize {
        self.revealed.iter().filter(|seen| !**seen).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FxConfig, PagePreset};

    #[test]
    fn stagger_grows_linearly_with_position() {
        assert_eq!(stagger_delay(0, 0.08), 0.0);
        assert_eq!(stagger_delay(1, 0.08), 0.08);
        assert!((stagger_delay(5, 0.08) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn projects_targets_cascade() {
        let config = FxConfig::for_page(PagePreset::Projects);
        let style = HiddenStyle::for_target(&config.reveal[1], 2);

        assert_eq!(style.opacity, "0");
        assert_eq!(style.transform, "translateY(28px)");
        assert_eq!(
            style.transition,
            "opacity 0.7s ease 0.16s, transform 0.7s ease 0.16s"
        );
    }

    #[test]
    fn unstaggered_targets_share_one_transition() {
        let config = FxConfig::for_page(PagePreset::About);
        let first = HiddenStyle::for_target(&config.reveal[1], 0);
        let later = HiddenStyle::for_target(&config.reveal[1], 4);

        assert_eq!(first, later);
        assert_eq!(first.transform, "translateY(24px)");
        assert_eq!(first.transition, "opacity 0.7s ease, transform 0.7s ease");
    }

    #[test]
    fn targets_reveal_once_and_stay_revealed() {
        let mut ledger = RevealLedger::with_targets(3);
        assert_eq!(ledger.pending(), 3);

        assert!(ledger.mark(1));
        assert!(!ledger.mark(1));
        assert!(ledger.is_revealed(1));
        assert_eq!(ledger.pending(), 2);

        assert!(ledger.mark(0));
        assert!(ledger.mark(2));
        assert!(!ledger.mark(0));
        assert_eq!(ledger.pending(), 0);
        assert!((0..3).all(|index| ledger.is_revealed(index)));
    }

    #[test]
    fn unknown_targets_are_ignored() {
        let mut ledger = RevealLedger::with_targets(1);
        assert!(!ledger.mark(7));
        assert!(!ledger.is_revealed(7));
        assert_eq!(ledger.target_count(), 1);
    }

    #[test]
    fn revealed_marker_is_matched_as_a_whole_class() {
        assert!(already_revealed(Some("card revealed")));
        assert!(already_revealed(Some("  revealed\tfade ")));
        assert!(!already_revealed(Some("card unrevealed")));
        assert!(!already_revealed(Some("")));
        assert!(!already_revealed(None));
    }
}
