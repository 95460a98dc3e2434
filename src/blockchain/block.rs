use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::pow;
use super::{GENESIS_DIFFICULTY, GENESIS_PROPERTY_ID, GENESIS_SENTINEL, ROOT_PREV_HASH};
use crate::transaction::{Property, Transaction};

/// A sealed, ordered batch of property transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: i64, // Unix timestamp (UTC)
    pub transactions: Vec<Transaction>,
    pub prev_hash: String,
    pub hash: String, // Cached hash of the block
    pub nonce: u64,   // Proof-of-Work nonce
}

impl Block {
    /// Create the genesis block: one synthetic transaction linked to the
    /// root sentinel, sealed at difficulty 0 (nonce 0 trivially satisfies it).
    pub fn genesis() -> Self {
        let now = Utc::now().timestamp();
        let genesis_tx = Transaction {
            from: GENESIS_SENTINEL.to_string(),
            to: GENESIS_SENTINEL.to_string(),
            property: Property {
                id: GENESIS_PROPERTY_ID.to_string(),
                owner: GENESIS_SENTINEL.to_string(),
                description: "Genesis Property".to_string(),
                location: "N/A".to_string(),
                value: 0,
            },
            timestamp: now,
        };
        let mut block = Self::with_timestamp(0, ROOT_PREV_HASH.to_string(), vec![genesis_tx], now);
        block.hash = block.compute_hash();
        debug_assert!(pow::meets_difficulty(&block.hash, GENESIS_DIFFICULTY));
        block
    }

    /// Create a candidate block (not sealed yet). See [`super::pow::mine`].
    pub fn new(index: u64, prev_hash: String, transactions: Vec<Transaction>) -> Self {
        Self::with_timestamp(index, prev_hash, transactions, Utc::now().timestamp())
    }

    /// Candidate with a caller-fixed timestamp, so identical inputs seal identically.
    pub fn with_timestamp(
        index: u64,
        prev_hash: String,
        transactions: Vec<Transaction>,
        timestamp: i64,
    ) -> Self {
        Self {
            index,
            timestamp,
            transactions,
            prev_hash,
            hash: String::new(),
            nonce: 0,
        }
    }

    /// Compute the SHA-256 hash of this block using its fields
    /// (excluding the `hash` field itself). Transactions are serialized
    /// as JSON with fixed field order and included in the preimage.
    pub fn compute_hash(&self) -> String {
        let txs_json = serde_json::to_string(&self.transactions).expect("serialize txs");
        let preimage = format!(
            "{}:{}:{}:{}:{}",
            self.index, self.timestamp, self.prev_hash, self.nonce, txs_json
        );
        let mut hasher = Sha256::new();
        hasher.update(preimage.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Whether the cached `hash` reproduces from the block's content.
    pub fn has_consistent_hash(&self) -> bool {
        self.hash == self.compute_hash()
    }
}
