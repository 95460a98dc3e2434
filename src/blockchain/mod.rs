pub mod block;
pub mod ledger;
pub mod pow;
pub mod validator;

pub use block::Block;
pub use ledger::{BlockSummary, HistoryEntry, Ledger};
pub use pow::{CancelToken, Seal};
pub use validator::{is_valid_chain, verify_chain};

/// Default Proof-of-Work difficulty (number of leading zeros).
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// Difficulty the genesis block is sealed at.
pub const GENESIS_DIFFICULTY: u32 = 0;

/// Length of a block hash in hex characters (SHA-256).
pub const HASH_HEX_LEN: usize = 64;

/// `prev_hash` of the genesis block.
pub const ROOT_PREV_HASH: &str = "0";

/// `from`/`to` of the synthetic genesis transaction.
pub const GENESIS_SENTINEL: &str = "genesis";

/// Property id carried by the synthetic genesis transaction.
pub const GENESIS_PROPERTY_ID: &str = "genesis_property";
