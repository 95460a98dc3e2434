use thiserror::Error;

/// Why a proposed transaction was refused admission to the pending pool.
/// Refusals never touch ledger state; the caller may fix the input and retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxRejection {
    #[error("invalid property ID")]
    InvalidPropertyId,

    #[error("invalid from/to addresses")]
    InvalidAddresses,

    #[error("cannot transfer non-existent property")]
    CannotTransferNonexistentProperty,

    #[error("sender does not own the property (owner: {expected}, claimed: {claimed})")]
    NotOwner { expected: String, claimed: String },
}

impl TxRejection {
    pub fn kind(&self) -> &'static str {
        match self {
            TxRejection::InvalidPropertyId => "invalid_property_id",
            TxRejection::InvalidAddresses => "invalid_addresses",
            TxRejection::CannotTransferNonexistentProperty => {
                "cannot_transfer_nonexistent_property"
            }
            TxRejection::NotOwner { .. } => "not_owner",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("property not found: {0}")]
pub struct PropertyNotFound(pub String);

impl PropertyNotFound {
    pub fn kind(&self) -> &'static str {
        "not_found"
    }
}

/// Failures of a seal attempt. None of them leave a partial block behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SealError {
    #[error("invalid difficulty {difficulty} (must be below {max})")]
    InvalidDifficulty { difficulty: u32, max: u32 },

    #[error("proof-of-work cancelled after {attempts} attempts")]
    Cancelled { attempts: u64 },

    #[error("nonce space exhausted without meeting the target")]
    NonceExhausted,
}

impl SealError {
    pub fn kind(&self) -> &'static str {
        match self {
            SealError::InvalidDifficulty { .. } => "invalid_difficulty",
            SealError::Cancelled { .. } => "cancelled",
            SealError::NonceExhausted => "nonce_exhausted",
        }
    }
}

/// First integrity violation found while walking the chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainFault {
    #[error("chain has no genesis block")]
    Empty,

    #[error("genesis block is malformed")]
    MalformedGenesis,

    #[error("block at position {position} carries index {found}")]
    IndexGap { position: usize, found: u64 },

    #[error("block #{index} does not link to its predecessor")]
    BrokenLink { index: u64 },

    #[error("block #{index} hash does not match its content")]
    HashMismatch { index: u64 },
}

impl ChainFault {
    pub fn kind(&self) -> &'static str {
        match self {
            ChainFault::Empty => "empty",
            ChainFault::MalformedGenesis => "malformed_genesis",
            ChainFault::IndexGap { .. } => "index_gap",
            ChainFault::BrokenLink { .. } => "broken_link",
            ChainFault::HashMismatch { .. } => "hash_mismatch",
        }
    }
}
