//! Policy profiles and fee-acceptance scoring.
//!
//! A named profile maps labels to a minimum feerate multiplier and a score
//! boost. Scoring is a pure function of the classification, the table and
//! the two feerate inputs; the active profile is a per-call parameter, not
//! instance state, so concurrent scoring needs no coordination.

use crate::classify::Classification;
use crate::tier::{summarize_tiers, TierSummary};
use serde::Serialize;
use std::collections::HashSet;

/// Lower clamp for the accumulated boost sum.
pub const BOOST_FLOOR: f64 = -0.9;
/// Upper clamp for the accumulated boost sum.
pub const BOOST_CEIL: f64 = 1.0;

/// Named built-in policy profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolicyProfile {
    Strict,
    #[default]
    Neutral,
    Permissive,
}

impl PolicyProfile {
    /// Resolves a profile by name. Unknown names fall back to `Neutral`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "strict" => PolicyProfile::Strict,
            "permissive" => PolicyProfile::Permissive,
            _ => PolicyProfile::Neutral,
        }
    }

    /// Canonical lower-case name.
    pub fn name(self) -> &'static str {
        match self {
            PolicyProfile::Strict => "strict",
            PolicyProfile::Neutral => "neutral",
            PolicyProfile::Permissive => "permissive",
        }
    }
}

/// Per-label policy: a feerate multiplier floor and a score boost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolicyEntry {
    /// Minimum feerate multiplier, >= 1.0.
    pub min_mult: f64,
    /// Score boost, accumulated once per distinct label.
    pub boost: f64,
}

const DEFAULT_ENTRY: PolicyEntry = PolicyEntry { min_mult: 1.0, boost: 0.0 };

/// Read-only label-to-policy mapping. Unlisted labels resolve to
/// `{min_mult: 1.0, boost: 0.0}`.
#[derive(Debug, Clone, Copy)]
pub struct PolicyTable {
    entries: &'static [(&'static str, PolicyEntry)],
}

impl PolicyTable {
    /// Table over a static entry list (label, entry) pairs.
    pub const fn new(entries: &'static [(&'static str, PolicyEntry)]) -> Self {
        Self { entries }
    }

    /// Policy for one label, defaulting when unlisted.
    pub fn entry_for(&self, label: &str) -> PolicyEntry {
        self.entries
            .iter()
            .find(|(name, _)| *name == label)
            .map(|(_, entry)| *entry)
            .unwrap_or(DEFAULT_ENTRY)
    }
}

const STRICT_ENTRIES: &[(&str, PolicyEntry)] = &[
    ("da.obfuscated", PolicyEntry { min_mult: 4.0, boost: -0.7 }),
    ("da.unknown", PolicyEntry { min_mult: 3.0, boost: -0.4 }),
    ("da.op_return_embed", PolicyEntry { min_mult: 2.0, boost: -0.2 }),
    ("pay.standard", PolicyEntry { min_mult: 1.0, boost: 0.0 }),
    ("pay.channel_open", PolicyEntry { min_mult: 1.0, boost: 0.2 }),
];

const NEUTRAL_ENTRIES: &[(&str, PolicyEntry)] = &[
    ("da.obfuscated", PolicyEntry { min_mult: 3.0, boost: -0.5 }),
    ("da.unknown", PolicyEntry { min_mult: 2.0, boost: -0.3 }),
    ("da.op_return_embed", PolicyEntry { min_mult: 1.5, boost: -0.1 }),
    ("pay.standard", PolicyEntry { min_mult: 1.0, boost: 0.0 }),
    ("pay.channel_open", PolicyEntry { min_mult: 1.0, boost: 0.1 }),
];

const PERMISSIVE_ENTRIES: &[(&str, PolicyEntry)] = &[
    ("da.obfuscated", PolicyEntry { min_mult: 2.0, boost: -0.3 }),
    ("da.unknown", PolicyEntry { min_mult: 1.5, boost: -0.1 }),
    ("da.op_return_embed", PolicyEntry { min_mult: 1.2, boost: -0.05 }),
    ("pay.standard", PolicyEntry { min_mult: 1.0, boost: 0.0 }),
    ("pay.channel_open", PolicyEntry { min_mult: 1.0, boost: 0.1 }),
];

/// Built-in table for a profile. Tables are constants, never mutated.
pub fn table_for_profile(profile: PolicyProfile) -> PolicyTable {
    match profile {
        PolicyProfile::Strict => PolicyTable::new(STRICT_ENTRIES),
        PolicyProfile::Neutral => PolicyTable::new(NEUTRAL_ENTRIES),
        PolicyProfile::Permissive => PolicyTable::new(PERMISSIVE_ENTRIES),
    }
}

/// Outcome of scoring one classification against a policy table.
#[derive(Debug, Clone, Serialize)]
pub struct PolicyScoreResult {
    /// Required feerate: `base_min_feerate * mult`.
    pub required: f64,
    /// Effective score: `observed_feerate * (1 + boost_sum)`.
    pub score: f64,
    /// Maximum `min_mult` across labels, never below 1.0.
    pub mult: f64,
    /// Accumulated boost, one contribution per distinct label, clamped to
    /// `[BOOST_FLOOR, BOOST_CEIL]`.
    pub boost_sum: f64,
    /// Tier summary of the scored classification.
    pub summary: TierSummary,
}

impl PolicyScoreResult {
    /// Admission decision, derived rather than stored: admitted iff the
    /// effective score meets the required feerate.
    pub fn admitted(&self) -> bool {
        self.score >= self.required
    }
}

/// Scores a classification against a built-in profile.
///
/// # Example
/// ```
/// use segop_buds::classify::{ContentClassifier, RawTransaction};
/// use segop_buds::policy::{compute_policy_score, PolicyProfile};
///
/// let tx = RawTransaction::from_json(r#"{
///     "txid": "ab12",
///     "vout": [{ "scriptPubKey": { "hex": "76a914000000000000000000000000000000000000000088ac" } }]
/// }"#).unwrap();
/// let classification = ContentClassifier::new().classify(&tx);
/// let result = compute_policy_score(&classification, PolicyProfile::Neutral, 1.0, 5.0);
/// assert!(result.admitted());
/// ```
pub fn compute_policy_score(
    classification: &Classification,
    profile: PolicyProfile,
    base_min_feerate: f64,
    observed_feerate: f64,
) -> PolicyScoreResult {
    compute_policy_score_with_table(
        classification,
        &table_for_profile(profile),
        base_min_feerate,
        observed_feerate,
    )
}

/// Scores against an explicit table; [`compute_policy_score`] delegates
/// here with a built-in one.
pub fn compute_policy_score_with_table(
    classification: &Classification,
    table: &PolicyTable,
    base_min_feerate: f64,
    observed_feerate: f64,
) -> PolicyScoreResult {
    let summary = summarize_tiers(classification);

    let mut mult = 1.0f64;
    let mut boost_sum = 0.0f64;
    let mut seen: HashSet<&str> = HashSet::new();
    for tag in &classification.tags {
        for label in &tag.labels {
            let entry = table.entry_for(label);
            mult = mult.max(entry.min_mult);
            // Each distinct label boosts exactly once, however many
            // regions carry it.
            if seen.insert(label.as_str()) {
                boost_sum += entry.boost;
            }
        }
    }
    let boost_sum = boost_sum.clamp(BOOST_FLOOR, BOOST_CEIL);

    PolicyScoreResult {
        required: base_min_feerate * mult,
        score: observed_feerate * (1.0 + boost_sum),
        mult,
        boost_sum,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Classification, TagRegion};
    use crate::tier::Tier;

    fn classification_with(labels: &[&str]) -> Classification {
        Classification {
            txid: "test".to_string(),
            tags: labels
                .iter()
                .enumerate()
                .map(|(i, label)| TagRegion {
                    surface: format!("witness.stack[0:{i}]"),
                    start: 0,
                    end: 100,
                    labels: vec![label.to_string()],
                })
                .collect(),
        }
    }

    #[test]
    fn test_neutral_obfuscated_rejected() {
        let classification = classification_with(&["da.obfuscated"]);
        let result =
            compute_policy_score(&classification, PolicyProfile::Neutral, 1.0, 5.0);
        assert_eq!(result.mult, 3.0);
        assert_eq!(result.required, 3.0);
        assert_eq!(result.boost_sum, -0.5);
        assert_eq!(result.score, 2.5);
        assert!(!result.admitted());
        assert_eq!(result.summary.count(Tier::T3), 1);
    }

    #[test]
    fn test_neutral_standard_pay_admitted() {
        let classification = classification_with(&["pay.standard"]);
        let result =
            compute_policy_score(&classification, PolicyProfile::Neutral, 1.0, 5.0);
        assert_eq!(result.mult, 1.0);
        assert_eq!(result.required, 1.0);
        assert_eq!(result.boost_sum, 0.0);
        assert_eq!(result.score, 5.0);
        assert!(result.admitted());
    }

    #[test]
    fn test_zero_regions() {
        let classification = classification_with(&[]);
        let result =
            compute_policy_score(&classification, PolicyProfile::Strict, 2.0, 7.0);
        assert_eq!(result.mult, 1.0);
        assert_eq!(result.required, 2.0);
        assert_eq!(result.boost_sum, 0.0);
        assert_eq!(result.score, 7.0);
        assert!(result.admitted());
    }

    #[test]
    fn test_distinct_label_boosts_once() {
        // Three regions with the same label: one boost, not three.
        let classification =
            classification_with(&["da.unknown", "da.unknown", "da.unknown"]);
        let result =
            compute_policy_score(&classification, PolicyProfile::Neutral, 1.0, 10.0);
        assert_eq!(result.boost_sum, -0.3);
        assert_eq!(result.mult, 2.0);
        assert_eq!(result.summary.count(Tier::T3), 3);
    }

    #[test]
    fn test_unlisted_label_defaults() {
        let classification = classification_with(&["commitment.rollup_root"]);
        let result =
            compute_policy_score(&classification, PolicyProfile::Strict, 1.0, 1.0);
        assert_eq!(result.mult, 1.0);
        assert_eq!(result.boost_sum, 0.0);
        assert!(result.admitted());
    }

    #[test]
    fn test_strict_stacking_hits_boost_floor() {
        // Strict boosts sum to -1.3; clamped exactly at the floor.
        let classification = classification_with(&[
            "da.obfuscated",
            "da.unknown",
            "da.op_return_embed",
        ]);
        let result =
            compute_policy_score(&classification, PolicyProfile::Strict, 1.0, 10.0);
        assert_eq!(result.boost_sum, BOOST_FLOOR);
        assert_eq!(result.mult, 4.0);
        assert!((result.score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_synthetic_table_hits_boost_ceiling() {
        static BONUS_ENTRIES: &[(&str, PolicyEntry)] = &[
            ("pay.channel_open", PolicyEntry { min_mult: 1.0, boost: 0.8 }),
            ("commitment.rollup_root", PolicyEntry { min_mult: 1.0, boost: 0.7 }),
        ];
        let table = PolicyTable::new(BONUS_ENTRIES);
        let classification =
            classification_with(&["pay.channel_open", "commitment.rollup_root"]);
        let result = compute_policy_score_with_table(&classification, &table, 1.0, 2.0);
        assert_eq!(result.boost_sum, BOOST_CEIL);
        assert_eq!(result.score, 4.0);
    }

    #[test]
    fn test_profile_name_fallback() {
        assert_eq!(PolicyProfile::from_name("strict"), PolicyProfile::Strict);
        assert_eq!(PolicyProfile::from_name("permissive"), PolicyProfile::Permissive);
        assert_eq!(PolicyProfile::from_name("neutral"), PolicyProfile::Neutral);
        assert_eq!(PolicyProfile::from_name("bogus"), PolicyProfile::Neutral);
        assert_eq!(PolicyProfile::from_name(""), PolicyProfile::Neutral);
        assert_eq!(PolicyProfile::Strict.name(), "strict");
    }

    #[test]
    fn test_profile_tables_exact_values() {
        let strict = table_for_profile(PolicyProfile::Strict);
        assert_eq!(strict.entry_for("da.obfuscated").min_mult, 4.0);
        assert_eq!(strict.entry_for("pay.channel_open").boost, 0.2);

        let neutral = table_for_profile(PolicyProfile::Neutral);
        assert_eq!(neutral.entry_for("da.op_return_embed").min_mult, 1.5);
        assert_eq!(neutral.entry_for("da.op_return_embed").boost, -0.1);

        let permissive = table_for_profile(PolicyProfile::Permissive);
        assert_eq!(permissive.entry_for("da.obfuscated").min_mult, 2.0);
        assert_eq!(permissive.entry_for("da.unknown").boost, -0.1);
        assert_eq!(permissive.entry_for("da.op_return_embed").boost, -0.05);
    }
}
