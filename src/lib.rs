//! Classification, tiering and fee-policy scoring for segOP/BUDS
//! binary-tagged transaction data.
//!
//! The crate splits into two regimes:
//!
//! - **Strict codecs** ([`hex`], [`tlv`], [`header`]): bounds-checked
//!   parsing over attacker-controlled byte buffers. Every malformed input
//!   produces a typed [`BudsError`]; the absence of a recognizable header
//!   is `Ok(None)`, never an error.
//! - **Lenient classification** ([`classify`], [`tier`], [`policy`]):
//!   heuristic, advisory tagging that never fails. Missing input fields
//!   degrade to empty collections and scoring always produces a result.
//!
//! Everything is a pure function of its explicit inputs. Policy tables are
//! read-only constants and the active profile is a per-call parameter, so
//! calls may run on any number of threads with no coordination.
//!
//! # Example
//! ```
//! use segop_buds::{
//!     compute_policy_score, resolve_transaction_tier, summarize_tiers,
//!     ContentClassifier, PolicyProfile, RawTransaction, Tier,
//! };
//!
//! let tx = RawTransaction::from_json(r#"{
//!     "txid": "ab12",
//!     "vout": [{ "value": 0.5, "scriptPubKey": { "asm": "OP_RETURN 4c32", "hex": "6a024c32" } }],
//!     "witness": [{ "stack": ["deadbeef"] }]
//! }"#).unwrap();
//!
//! let classification = ContentClassifier::new().classify(&tx);
//! let summary = summarize_tiers(&classification);
//! assert_eq!(resolve_transaction_tier(&summary), Tier::T3);
//!
//! let result = compute_policy_score(&classification, PolicyProfile::Neutral, 1.0, 5.0);
//! assert_eq!(result.required, 2.0);
//! assert!(result.admitted());
//! ```

pub mod classify;
pub mod errors;
pub mod header;
pub mod hex;
pub mod policy;
pub mod registry;
pub mod tier;
pub mod tlv;

pub use classify::{Classification, ContentClassifier, RawTransaction, TagRegion};
pub use errors::{BudsError, Result};
pub use header::{decode_header, decode_header_hex, BudsHeader, FixedHeader, HeaderFields};
pub use hex::{decode_hex, encode_hex};
pub use policy::{
    compute_policy_score, compute_policy_score_with_table, table_for_profile, PolicyEntry,
    PolicyProfile, PolicyScoreResult, PolicyTable,
};
pub use tier::{resolve_transaction_tier, summarize_tiers, tier_for_label, Tier, TierSummary};
pub use tlv::{decode_sequence, encode_one, encode_sequence, TlvRecord};
