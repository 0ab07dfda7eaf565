//! Heuristic content classification over transaction surfaces.
//!
//! This layer is lenient by design: it never fails on malformed input.
//! Missing arrays degrade to empty, missing sub-fields to empty strings,
//! and every scanned unit yields exactly one [`TagRegion`]. Classification
//! is advisory; it protects nothing and must always produce a best-effort
//! result.

use crate::registry::{
    LABEL_OBFUSCATED, LABEL_OP_RETURN_EMBED, LABEL_PAY_STANDARD, LABEL_UNKNOWN,
};
use serde::{Deserialize, Serialize};

/// Witness stack entries above this byte length are labeled as large
/// opaque blobs.
pub const DEFAULT_LARGE_BLOB_THRESHOLD: usize = 512;

/// Loosely-typed transaction input, tolerant of missing fields.
///
/// Matches the node-RPC verbose transaction shape:
/// `{ txid, vout: [{ value, scriptPubKey: { asm, hex } }], witness: [{ stack: [hex] }] }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTransaction {
    #[serde(default)]
    pub txid: String,
    #[serde(default)]
    pub vout: Vec<RawTxOut>,
    #[serde(default)]
    pub witness: Vec<RawWitness>,
}

/// One output of a [`RawTransaction`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTxOut {
    #[serde(default)]
    pub value: f64,
    #[serde(default, rename = "scriptPubKey")]
    pub script_pub_key: RawScriptPubKey,
}

/// Output script in symbolic and hex byte form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawScriptPubKey {
    #[serde(default)]
    pub asm: String,
    #[serde(default)]
    pub hex: String,
}

/// Witness data for one input: a stack of hex-encoded items.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWitness {
    #[serde(default)]
    pub stack: Vec<String>,
}

impl RawTransaction {
    /// Decodes from a JSON document. Unknown fields are ignored and missing
    /// fields default, matching the lenient regime of this layer.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// One tagged region of a transaction.
///
/// `start` is always 0 and `end` is the unit's byte length: classification
/// reports size at surface granularity, not absolute buffer offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRegion {
    /// Human-readable locator, e.g. `scriptpubkey[0]` or
    /// `witness.stack[1:0]`.
    pub surface: String,
    pub start: usize,
    pub end: usize,
    /// Labels attached to this region, in emission order.
    pub labels: Vec<String>,
}

/// All tagged regions of one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub txid: String,
    pub tags: Vec<TagRegion>,
}

/// One recognized output-script shape.
///
/// Matchers run in order, first match wins, and the list ends in an
/// explicit fallback in [`ContentClassifier::classify`]. Adding a new
/// shape (P2WPKH, P2TR, multisig, ...) means adding one row here.
struct ScriptMatcher {
    label: &'static str,
    matches: fn(&RawScriptPubKey) -> bool,
}

const SCRIPT_MATCHERS: &[ScriptMatcher] = &[
    ScriptMatcher { label: LABEL_OP_RETURN_EMBED, matches: is_likely_op_return },
    ScriptMatcher { label: LABEL_PAY_STANDARD, matches: is_likely_p2pkh },
];

fn is_likely_op_return(spk: &RawScriptPubKey) -> bool {
    spk.asm.starts_with("OP_RETURN") || spk.hex.to_ascii_lowercase().starts_with("6a")
}

// P2PKH: OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG,
// recognized by its fixed 25-byte length and prefix/suffix bytes.
fn is_likely_p2pkh(spk: &RawScriptPubKey) -> bool {
    let hex = spk.hex.to_ascii_lowercase();
    hex.len() == 50 && hex.starts_with("76a914") && hex.ends_with("88ac")
}

// Byte length of a hex string, tolerant of stray trailing digits.
fn hex_byte_len(hex: &str) -> usize {
    hex.trim().len() / 2
}

/// Classifies transaction outputs and witness data into semantic labels.
///
/// Pure and stateless apart from the configured blob threshold; any number
/// of classify calls may run concurrently.
#[derive(Debug, Clone)]
pub struct ContentClassifier {
    large_blob_threshold: usize,
}

impl Default for ContentClassifier {
    fn default() -> Self {
        Self { large_blob_threshold: DEFAULT_LARGE_BLOB_THRESHOLD }
    }
}

impl ContentClassifier {
    /// Classifier with the default 512-byte blob threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifier with a custom large-blob threshold (exclusive: entries of
    /// exactly `threshold` bytes are still "unknown", not "obfuscated").
    pub fn with_threshold(threshold: usize) -> Self {
        Self { large_blob_threshold: threshold }
    }

    /// Inspects every output script and witness stack entry and emits one
    /// [`TagRegion`] per scanned unit. Never fails.
    ///
    /// # Example
    /// ```
    /// use segop_buds::classify::{ContentClassifier, RawTransaction};
    ///
    /// let tx = RawTransaction::from_json(r#"{
    ///     "txid": "ab12",
    ///     "vout": [{ "value": 0.5, "scriptPubKey": { "asm": "OP_RETURN 4c325f524f4f545f524556", "hex": "6a0c4c325f524f4f545f524556" } }]
    /// }"#).unwrap();
    /// let classification = ContentClassifier::new().classify(&tx);
    /// assert_eq!(classification.tags[0].labels, vec!["da.op_return_embed"]);
    /// ```
    pub fn classify(&self, tx: &RawTransaction) -> Classification {
        let mut tags = Vec::new();

        for (idx, out) in tx.vout.iter().enumerate() {
            let spk = &out.script_pub_key;
            let label = SCRIPT_MATCHERS
                .iter()
                .find(|m| (m.matches)(spk))
                .map(|m| m.label)
                // Unrecognized shapes conservatively count as standard pay.
                .unwrap_or(LABEL_PAY_STANDARD);
            tags.push(TagRegion {
                surface: format!("scriptpubkey[{idx}]"),
                start: 0,
                end: hex_byte_len(&spk.hex),
                labels: vec![label.to_string()],
            });
        }

        for (vin_idx, witness) in tx.witness.iter().enumerate() {
            for (stack_idx, item) in witness.stack.iter().enumerate() {
                let byte_len = hex_byte_len(item);
                let label = if byte_len > self.large_blob_threshold {
                    LABEL_OBFUSCATED
                } else {
                    LABEL_UNKNOWN
                };
                tags.push(TagRegion {
                    surface: format!("witness.stack[{vin_idx}:{stack_idx}]"),
                    start: 0,
                    end: byte_len,
                    labels: vec![label.to_string()],
                });
            }
        }

        let txid = if tx.txid.is_empty() {
            "<no-txid>".to_string()
        } else {
            tx.txid.clone()
        };
        Classification { txid, tags }
    }
}
