use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::blockchain::{Block, BlockSummary, CancelToken, HistoryEntry, Ledger};
use crate::config::Config;
use crate::transaction::Transaction;

/// Shared application state: one ledger behind one lock (held for the whole
/// seal, proof-of-work included) and the cancel handle of the running seal.
pub struct AppState {
    pub ledger: Mutex<Ledger>,
    pub active_seal: Mutex<Option<CancelToken>>,
    pub default_difficulty: u32,
    pub max_difficulty: u32,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            ledger: Mutex::new(Ledger::new()),
            active_seal: Mutex::new(None),
            default_difficulty: config.default_difficulty,
            max_difficulty: config.max_difficulty,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

/* ---------- Error Model ---------- */

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub length: usize,
    pub chain: &'a [Block],
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
    pub fault: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MineRequest {
    #[serde(default)]
    pub miner: Option<String>,
    #[serde(default)]
    pub difficulty: Option<u32>,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub sealed: bool,
    pub message: &'static str,
    pub block: Option<BlockSummary>,
}

#[derive(Serialize)]
pub struct CancelResponse {
    pub cancelled: bool,
}

/* ---------- TX API Models ---------- */

#[derive(Serialize)]
pub struct PendingResponse<'a> {
    pub size: usize,
    pub transactions: &'a [Transaction],
}

/* ---------- Property API Models ---------- */

#[derive(Serialize)]
pub struct HistoryResponse {
    pub id: String,
    pub entries: Vec<HistoryEntry>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub height: usize,
    pub last_hash: String,
    pub pending_size: usize,
    pub registered_properties: usize,
    pub default_difficulty: u32,
    pub max_difficulty: u32,
    pub mining: bool,
}
