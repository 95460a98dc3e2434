use log::{debug, info, warn};
use serde::Serialize;

use super::pow::{self, CancelToken};
use super::{Block, validator};
use crate::error::{ChainFault, PropertyNotFound, SealError, TxRejection};
use crate::transaction::{Property, Registry, Transaction, admit};

/// Outcome of a successful seal, for callers and logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockSummary {
    pub index: u64,
    pub hash: String,
    pub nonce: u64,
    pub timestamp: i64,
    pub transactions: usize,
    pub miner: String,
    pub difficulty: u32,
    pub attempts: u64,
}

/// A sealed transaction that touched a given property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub block_index: u64,
    pub block_hash: String,
    pub transaction: Transaction,
}

/// In-memory property ledger: the sealed chain, the pending pool and the
/// current-owner registry derived from the chain.
///
/// All mutation goes through `&mut self`, so callers sharing a ledger must
/// serialize writers (e.g. behind one `Mutex` held for the whole seal).
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
    registry: Registry,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Initialize a new ledger with a genesis block.
    pub fn new() -> Self {
        let genesis = Block::genesis();
        let mut registry = Registry::new();
        registry.apply_all(&genesis.transactions);
        info!("LEDGER - genesis sealed (hash={})", genesis.hash);

        Self {
            chain: vec![genesis],
            pending: Vec::new(),
            registry,
        }
    }

    /// Admit `tx` against the sealed registry and queue it. Returns the
    /// transaction as queued (a registration carries the creator sentinel).
    pub fn submit_transaction(&mut self, tx: Transaction) -> Result<Transaction, TxRejection> {
        let accepted = admit(&self.registry, tx)?;
        self.pending.push(accepted.clone());
        debug!(
            "LEDGER - queued tx for '{}' (pending: {})",
            accepted.property.id,
            self.pending.len()
        );
        Ok(accepted)
    }

    /// Seal every pending transaction into a new block.
    ///
    /// Returns `Ok(None)` when the pool is empty. On any error the chain,
    /// pool and registry are left exactly as they were.
    pub fn seal_block(
        &mut self,
        miner: &str,
        difficulty: u32,
    ) -> Result<Option<BlockSummary>, SealError> {
        self.seal(miner, difficulty, None)
    }

    /// [`Ledger::seal_block`] that stops with [`SealError::Cancelled`] once
    /// `cancel` is triggered.
    pub fn seal_block_with_cancel(
        &mut self,
        miner: &str,
        difficulty: u32,
        cancel: &CancelToken,
    ) -> Result<Option<BlockSummary>, SealError> {
        self.seal(miner, difficulty, Some(cancel))
    }

    fn seal(
        &mut self,
        miner: &str,
        difficulty: u32,
        cancel: Option<&CancelToken>,
    ) -> Result<Option<BlockSummary>, SealError> {
        pow::check_difficulty(difficulty)?;

        if self.pending.is_empty() {
            debug!("LEDGER - nothing to seal (miner={miner})");
            return Ok(None);
        }

        let last = self.last_block();
        let mut candidate = Block::new(last.index + 1, last.hash.clone(), self.pending.clone());
        debug!(
            "LEDGER - sealing block #{} with {} txs at difficulty {} (miner={})",
            candidate.index,
            candidate.transactions.len(),
            difficulty,
            miner
        );

        let sealed = match cancel {
            Some(token) => pow::mine_with_cancel(&mut candidate, difficulty, token),
            None => pow::mine(&mut candidate, difficulty),
        };
        let seal = sealed.inspect_err(|e| {
            warn!("LEDGER - seal of block #{} abandoned: {}", candidate.index, e);
        })?;

        self.registry.apply_all(&candidate.transactions);
        let summary = BlockSummary {
            index: candidate.index,
            hash: seal.hash,
            nonce: seal.nonce,
            timestamp: candidate.timestamp,
            transactions: candidate.transactions.len(),
            miner: miner.to_string(),
            difficulty,
            attempts: seal.attempts,
        };
        self.chain.push(candidate);
        self.pending.clear();

        info!(
            "LEDGER - sealed block #{} (hash={}, nonce={}, txs={}, miner={})",
            summary.index, summary.hash, summary.nonce, summary.transactions, summary.miner
        );
        Ok(Some(summary))
    }

    /// Current registry snapshot for `id`.
    pub fn get_property(&self, id: &str) -> Result<&Property, PropertyNotFound> {
        self.registry
            .get(id)
            .ok_or_else(|| PropertyNotFound(id.to_string()))
    }

    /// Every sealed transaction for `id`, in chain order.
    pub fn property_history(&self, id: &str) -> Vec<HistoryEntry> {
        self.chain
            .iter()
            .flat_map(|block| {
                block
                    .transactions
                    .iter()
                    .filter(move |tx| tx.property.id == id)
                    .map(move |tx| HistoryEntry {
                        block_index: block.index,
                        block_hash: block.hash.clone(),
                        transaction: tx.clone(),
                    })
            })
            .collect()
    }

    /// Read-only view of the full sealed chain.
    pub fn export_chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn validate_chain(&self) -> bool {
        validator::is_valid_chain(&self.chain)
    }

    pub fn verify_chain(&self) -> Result<(), ChainFault> {
        validator::verify_chain(&self.chain)
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger always holds at least the genesis block")
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::{GENESIS_PROPERTY_ID, GENESIS_SENTINEL, HASH_HEX_LEN};
    use crate::transaction::CREATOR;

    fn register(ledger: &mut Ledger, id: &str, owner: &str) {
        ledger
            .submit_transaction(Transaction::new("", owner, Property::reference(id)))
            .unwrap();
    }

    #[test]
    fn new_ledger_holds_only_genesis() {
        let ledger = Ledger::new();
        assert_eq!(ledger.len(), 1);
        assert!(ledger.pending().is_empty());
        assert!(ledger.validate_chain());
        assert_eq!(
            ledger.get_property(GENESIS_PROPERTY_ID).unwrap().owner,
            GENESIS_SENTINEL
        );
    }

    #[test]
    fn rejected_tx_leaves_pool_untouched() {
        let mut ledger = Ledger::new();
        let err = ledger
            .submit_transaction(Transaction::new("ghost", "bob", Property::reference("p1")))
            .unwrap_err();
        assert_eq!(err, TxRejection::CannotTransferNonexistentProperty);
        assert!(ledger.pending().is_empty());
    }

    #[test]
    fn empty_pool_seals_nothing() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.seal_block("miner", 1), Ok(None));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn seal_appends_block_and_updates_registry() {
        let mut ledger = Ledger::new();
        register(&mut ledger, "p1", "alice");
        assert!(ledger.get_property("p1").is_err());

        let summary = ledger.seal_block("miner1", 1).unwrap().unwrap();
        assert_eq!(summary.index, 1);
        assert_eq!(summary.transactions, 1);
        assert_eq!(summary.miner, "miner1");
        assert!(summary.hash.starts_with('0'));

        assert_eq!(ledger.len(), 2);
        assert!(ledger.pending().is_empty());
        assert_eq!(ledger.last_block().prev_hash, ledger.export_chain()[0].hash);
        assert_eq!(ledger.last_block().transactions[0].from, CREATOR);
        assert_eq!(ledger.get_property("p1").unwrap().owner, "alice");
        assert!(ledger.validate_chain());
    }

    #[test]
    fn invalid_difficulty_changes_nothing() {
        let mut ledger = Ledger::new();
        register(&mut ledger, "p1", "alice");
        let err = ledger.seal_block("m", HASH_HEX_LEN as u32).unwrap_err();
        assert_eq!(err.kind(), "invalid_difficulty");
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.pending().len(), 1);
    }

    #[test]
    fn invalid_difficulty_reported_even_with_empty_pool() {
        let mut ledger = Ledger::new();
        assert!(ledger.seal_block("m", 100).is_err());
    }

    #[test]
    fn cancelled_seal_is_all_or_nothing() {
        let mut ledger = Ledger::new();
        register(&mut ledger, "p1", "alice");
        let token = CancelToken::new();
        token.cancel();

        let err = ledger.seal_block_with_cancel("m", 4, &token).unwrap_err();
        assert_eq!(err.kind(), "cancelled");
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.pending().len(), 1);
        assert!(ledger.get_property("p1").is_err());
    }

    #[test]
    fn cancelling_a_running_seal_changes_nothing() {
        let mut ledger = Ledger::new();
        register(&mut ledger, "p1", "alice");
        let genesis_hash = ledger.last_block().hash.clone();
        let token = CancelToken::new();

        let worker = {
            let token = token.clone();
            std::thread::spawn(move || {
                let outcome = ledger.seal_block_with_cancel("m", 40, &token);
                (ledger, outcome)
            })
        };
        std::thread::sleep(std::time::Duration::from_millis(100));
        token.cancel();
        let (ledger, outcome) = worker.join().unwrap();

        match outcome {
            Err(SealError::Cancelled { attempts }) => assert!(attempts > 0),
            other => panic!("expected cancellation, got {other:?}"),
        }
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.last_block().hash, genesis_hash);
        assert_eq!(ledger.pending().len(), 1);
        assert!(ledger.get_property("p1").is_err());
        assert!(ledger.validate_chain());
    }

    #[test]
    fn same_block_transfers_are_last_write_wins() {
        let mut ledger = Ledger::new();
        register(&mut ledger, "p1", "alice");
        ledger.seal_block("m", 0).unwrap();

        for to in ["bob", "carol"] {
            ledger
                .submit_transaction(Transaction::new("alice", to, Property::reference("p1")))
                .unwrap();
        }
        ledger.seal_block("m", 0).unwrap();
        assert_eq!(ledger.get_property("p1").unwrap().owner, "carol");
    }

    #[test]
    fn registry_equals_replay_of_chain() {
        let mut ledger = Ledger::new();
        register(&mut ledger, "p1", "alice");
        register(&mut ledger, "p2", "bob");
        ledger.seal_block("m", 1).unwrap();
        ledger
            .submit_transaction(Transaction::new("alice", "carol", Property::reference("p1")))
            .unwrap();
        ledger.seal_block("m", 1).unwrap();

        assert_eq!(ledger.registry(), &Registry::replay(ledger.export_chain()));
    }

    #[test]
    fn history_lists_sealed_transactions_in_order() {
        let mut ledger = Ledger::new();
        register(&mut ledger, "p1", "alice");
        ledger.seal_block("m", 0).unwrap();
        ledger
            .submit_transaction(Transaction::new("alice", "bob", Property::reference("p1")))
            .unwrap();
        assert_eq!(ledger.property_history("p1").len(), 1);

        ledger.seal_block("m", 0).unwrap();
        let history = ledger.property_history("p1");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].block_index, 1);
        assert_eq!(history[1].block_index, 2);
        assert_eq!(history[1].transaction.to, "bob");
        assert!(ledger.property_history("missing").is_empty());
    }
}
