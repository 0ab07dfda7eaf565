//! BUDS label registry and reserved TLV content-type codes.
//!
//! The registry is advisory metadata: it makes labels and tiers
//! human-readable for inspectors and builders. The classifier and tier
//! resolver own the actual rules; nothing here changes their behavior.

use crate::tier::Tier;

/// Standard spendable output, recognized or assumed.
pub const LABEL_PAY_STANDARD: &str = "pay.standard";
/// Lightning/L2 channel open.
pub const LABEL_PAY_CHANNEL_OPEN: &str = "pay.channel_open";
/// Explicit OP_RETURN-embedded metadata.
pub const LABEL_OP_RETURN_EMBED: &str = "da.op_return_embed";
/// Unclassified data.
pub const LABEL_UNKNOWN: &str = "da.unknown";
/// Large opaque blobs.
pub const LABEL_OBFUSCATED: &str = "da.obfuscated";

/// One registry row: a label, what it means, the transaction surfaces it
/// appears on, and the tier it normally resolves to.
#[derive(Debug, Clone, Copy)]
pub struct BudsLabelInfo {
    pub label: &'static str,
    pub description: &'static str,
    pub surfaces: &'static [&'static str],
    pub suggested_tier: Tier,
}

/// The built-in label registry. Suggested tiers agree with
/// [`crate::tier::tier_for_label`] for every row.
pub const LABEL_REGISTRY: &[BudsLabelInfo] = &[
    // Consensus-critical
    BudsLabelInfo {
        label: "consensus.sig",
        description: "Signatures required for validation.",
        surfaces: &["witness_stack", "scriptsig"],
        suggested_tier: Tier::T0,
    },
    BudsLabelInfo {
        label: "consensus.script",
        description: "Executed script regions enforcing spending.",
        surfaces: &["scriptsig", "witness_script", "scriptpubkey"],
        suggested_tier: Tier::T0,
    },
    BudsLabelInfo {
        label: "consensus.taproot_prog",
        description: "Taproot or tapscript programs.",
        surfaces: &["witness_script"],
        suggested_tier: Tier::T0,
    },
    // Payments / L2 anchors
    BudsLabelInfo {
        label: LABEL_PAY_STANDARD,
        description: "Standard payments.",
        surfaces: &["scriptpubkey"],
        suggested_tier: Tier::T1,
    },
    BudsLabelInfo {
        label: LABEL_PAY_CHANNEL_OPEN,
        description: "Lightning/L2 channel open.",
        surfaces: &["scriptpubkey", "witness_script"],
        suggested_tier: Tier::T1,
    },
    BudsLabelInfo {
        label: "pay.channel_update",
        description: "Updates for channel/L2 contracts.",
        surfaces: &["witness_stack", "witness_script"],
        suggested_tier: Tier::T1,
    },
    BudsLabelInfo {
        label: "contracts.vault",
        description: "Vault or recovery structures.",
        surfaces: &["scriptpubkey", "witness_script"],
        suggested_tier: Tier::T1,
    },
    BudsLabelInfo {
        label: "commitment.rollup_root",
        description: "Rollup anchor commitments.",
        surfaces: &["scriptpubkey", "witness_stack", "coinbase"],
        suggested_tier: Tier::T1,
    },
    // Explicit metadata
    BudsLabelInfo {
        label: LABEL_OP_RETURN_EMBED,
        description: "Explicit OP_RETURN metadata.",
        surfaces: &["op_return"],
        suggested_tier: Tier::T2,
    },
    BudsLabelInfo {
        label: "meta.inscription",
        description: "Inscription-like metadata.",
        surfaces: &["witness_stack", "op_return"],
        suggested_tier: Tier::T2,
    },
    BudsLabelInfo {
        label: "meta.ordinal",
        description: "Ordinal/NFT metadata.",
        surfaces: &["witness_stack", "op_return"],
        suggested_tier: Tier::T2,
    },
    BudsLabelInfo {
        label: "meta.indexer_hint",
        description: "Indexer hints.",
        surfaces: &["op_return", "scriptpubkey", "witness_stack"],
        suggested_tier: Tier::T2,
    },
    // Arbitrary
    BudsLabelInfo {
        label: LABEL_UNKNOWN,
        description: "Unclassified data.",
        surfaces: &[
            "scriptsig",
            "witness_stack",
            "witness_script",
            "scriptpubkey",
            "op_return",
            "coinbase",
        ],
        suggested_tier: Tier::T3,
    },
    BudsLabelInfo {
        label: LABEL_OBFUSCATED,
        description: "Large opaque blobs.",
        surfaces: &["scriptsig", "witness_stack", "witness_script", "scriptpubkey"],
        suggested_tier: Tier::T3,
    },
    BudsLabelInfo {
        label: "da.unregistered_vendor",
        description: "Vendor-specific non-public data.",
        surfaces: &["witness_stack", "witness_script", "scriptpubkey"],
        suggested_tier: Tier::T3,
    },
];

/// Finds a registry row by exact label string.
pub fn find_label(name: &str) -> Option<&'static BudsLabelInfo> {
    LABEL_REGISTRY.iter().find(|info| info.label == name)
}

/// Reserved TLV content-type bytes used by payload builders.
pub mod content_type {
    /// Human-readable UTF-8 string.
    pub const TEXT_UTF8: u8 = 0x01;
    /// Structured (JSON-like) UTF-8 data.
    pub const STRUCTURED_JSON: u8 = 0x02;
    /// Opaque binary blob.
    pub const BINARY_BLOB: u8 = 0x03;
    /// Start of the application-specific range.
    pub const APP_SPECIFIC_MIN: u8 = 0x10;
    /// End of the application-specific range (inclusive).
    pub const APP_SPECIFIC_MAX: u8 = 0x1f;

    /// Short description of a content-type byte for display.
    pub fn describe(code: u8) -> &'static str {
        match code {
            TEXT_UTF8 => "text",
            STRUCTURED_JSON => "structured",
            BINARY_BLOB => "blob",
            APP_SPECIFIC_MIN..=APP_SPECIFIC_MAX => "app-specific",
            _ => "unknown",
        }
    }
}
