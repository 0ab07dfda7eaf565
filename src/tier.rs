//! ARBDA tier mapping and per-transaction aggregation.
//!
//! Tiers order data by sensitivity/priority: T0 is consensus-adjacent,
//! T3 is arbitrary bulk data. Label-to-tier mapping is prefix-based; the
//! per-transaction tier is the worst tier observed anywhere in it.

use crate::classify::Classification;
use crate::registry::LABEL_OP_RETURN_EMBED;
use serde::Serialize;
use std::fmt;

/// Ordinal data tier, T0 (highest priority) through T3 (lowest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Tier {
    T0,
    T1,
    T2,
    T3,
}

impl Tier {
    /// All tiers in ascending order.
    pub const ALL: [Tier; 4] = [Tier::T0, Tier::T1, Tier::T2, Tier::T3];

    /// Numeric wire code (0..3).
    pub fn code(self) -> u8 {
        match self {
            Tier::T0 => 0,
            Tier::T1 => 1,
            Tier::T2 => 2,
            Tier::T3 => 3,
        }
    }

    /// Maps a wire code back to a tier. Codes above 3 resolve to T3.
    pub fn from_code(code: u8) -> Tier {
        match code {
            0 => Tier::T0,
            1 => Tier::T1,
            2 => Tier::T2,
            _ => Tier::T3,
        }
    }

    /// Canonical "T0".."T3" name.
    pub fn name(self) -> &'static str {
        match self {
            Tier::T0 => "T0",
            Tier::T1 => "T1",
            Tier::T2 => "T2",
            Tier::T3 => "T3",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolves a label to its tier. Prefix rules are evaluated in fixed
/// priority order; anything unrecognized is T3.
pub fn tier_for_label(label: &str) -> Tier {
    if label.starts_with("consensus.") {
        return Tier::T0;
    }
    if label.starts_with("pay.")
        || label.starts_with("commitment.")
        || label.starts_with("contracts.")
    {
        return Tier::T1;
    }
    if label.starts_with("meta.")
        || label.starts_with("index.")
        || label.starts_with("signals.")
        || label == LABEL_OP_RETURN_EMBED
    {
        return Tier::T2;
    }
    Tier::T3
}

/// Per-tier label occurrence counts for one classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TierSummary {
    counts: [u32; 4],
}

impl TierSummary {
    /// Label occurrences resolved to `tier`.
    pub fn count(&self, tier: Tier) -> u32 {
        self.counts[tier.code() as usize]
    }

    /// Tiers with at least one occurrence, ascending.
    pub fn tiers_present(&self) -> Vec<Tier> {
        Tier::ALL.iter().copied().filter(|t| self.count(*t) > 0).collect()
    }

    fn bump(&mut self, tier: Tier) {
        self.counts[tier.code() as usize] += 1;
    }
}

/// Counts label occurrences per tier. A region with two labels contributes
/// to two tier buckets, one per label.
pub fn summarize_tiers(classification: &Classification) -> TierSummary {
    let mut summary = TierSummary::default();
    for tag in &classification.tags {
        for label in &tag.labels {
            summary.bump(tier_for_label(label));
        }
    }
    summary
}

/// Aggregates a summary to the transaction's tier: the worst tier with any
/// occurrence wins, so a single T3 label anywhere forces T3.
pub fn resolve_transaction_tier(summary: &TierSummary) -> Tier {
    for tier in [Tier::T3, Tier::T2, Tier::T1] {
        if summary.count(tier) > 0 {
            return tier;
        }
    }
    Tier::T0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Classification, TagRegion};

    fn classification_with(labels: &[&[&str]]) -> Classification {
        Classification {
            txid: "test".to_string(),
            tags: labels
                .iter()
                .enumerate()
                .map(|(i, region_labels)| TagRegion {
                    surface: format!("scriptpubkey[{i}]"),
                    start: 0,
                    end: 10,
                    labels: region_labels.iter().map(|l| l.to_string()).collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_tier_for_label_priority_order() {
        assert_eq!(tier_for_label("consensus.sig"), Tier::T0);
        assert_eq!(tier_for_label("pay.standard"), Tier::T1);
        assert_eq!(tier_for_label("commitment.rollup_root"), Tier::T1);
        assert_eq!(tier_for_label("contracts.vault"), Tier::T1);
        assert_eq!(tier_for_label("meta.inscription"), Tier::T2);
        assert_eq!(tier_for_label("index.hint"), Tier::T2);
        assert_eq!(tier_for_label("signals.relay"), Tier::T2);
        assert_eq!(tier_for_label("da.op_return_embed"), Tier::T2);
        assert_eq!(tier_for_label("da.obfuscated"), Tier::T3);
        assert_eq!(tier_for_label("da.unknown"), Tier::T3);
        assert_eq!(tier_for_label("something.else"), Tier::T3);
        assert_eq!(tier_for_label(""), Tier::T3);
    }

    #[test]
    fn test_summarize_counts_per_label_occurrence() {
        let classification =
            classification_with(&[&["pay.standard", "meta.inscription"], &["pay.standard"]]);
        let summary = summarize_tiers(&classification);
        assert_eq!(summary.count(Tier::T1), 2);
        assert_eq!(summary.count(Tier::T2), 1);
        assert_eq!(summary.count(Tier::T3), 0);
        assert_eq!(summary.tiers_present(), vec![Tier::T1, Tier::T2]);
    }

    #[test]
    fn test_worst_tier_wins() {
        let classification =
            classification_with(&[&["pay.standard"], &["da.obfuscated"]]);
        let summary = summarize_tiers(&classification);
        assert_eq!(resolve_transaction_tier(&summary), Tier::T3);

        let classification = classification_with(&[&["pay.standard"], &["meta.ordinal"]]);
        assert_eq!(
            resolve_transaction_tier(&summarize_tiers(&classification)),
            Tier::T2
        );

        let classification = classification_with(&[&["consensus.sig"]]);
        assert_eq!(
            resolve_transaction_tier(&summarize_tiers(&classification)),
            Tier::T0
        );
    }

    #[test]
    fn test_empty_classification_is_t0() {
        let summary = summarize_tiers(&classification_with(&[]));
        assert_eq!(resolve_transaction_tier(&summary), Tier::T0);
        assert!(summary.tiers_present().is_empty());
    }

    #[test]
    fn test_tier_codes() {
        for tier in Tier::ALL {
            assert_eq!(Tier::from_code(tier.code()), tier);
        }
        assert_eq!(Tier::from_code(0xff), Tier::T3);
        assert_eq!(Tier::T2.to_string(), "T2");
        assert!(Tier::T0 < Tier::T3);
    }
}
