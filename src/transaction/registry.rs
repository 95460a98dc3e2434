use std::collections::HashMap;

use super::model::{Property, Transaction};
use crate::blockchain::Block;

/// Current-owner index: property id -> latest sealed snapshot.
/// Derived state; always equal to [`Registry::replay`] over the sealed chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    map: HashMap<String, Property>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Rebuild the registry by folding every block's transactions in chain order.
    pub fn replay(blocks: &[Block]) -> Self {
        blocks.iter().fold(Self::new(), |mut registry, block| {
            registry.apply_all(&block.transactions);
            registry
        })
    }

    /// Record the snapshot left by a sealed transaction. Later writes for
    /// the same id replace earlier ones.
    pub fn apply(&mut self, tx: &Transaction) {
        self.map
            .insert(tx.property.id.clone(), tx.resulting_property());
    }

    pub fn apply_all(&mut self, txs: &[Transaction]) {
        for tx in txs {
            self.apply(tx);
        }
    }

    pub fn get(&self, id: &str) -> Option<&Property> {
        self.map.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.map.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::CREATOR;

    fn tx(from: &str, to: &str, id: &str, description: &str) -> Transaction {
        Transaction::new(
            from,
            to,
            Property {
                id: id.into(),
                description: description.into(),
                ..Property::default()
            },
        )
    }

    #[test]
    fn last_write_wins_for_same_id() {
        let mut registry = Registry::new();
        registry.apply_all(&[
            tx(CREATOR, "alice", "p1", "first"),
            tx("alice", "bob", "p1", "second"),
            tx("alice", "carol", "p1", "third"),
        ]);
        let prop = registry.get("p1").unwrap();
        assert_eq!(prop.owner, "carol");
        assert_eq!(prop.description, "third");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn transfer_replaces_whole_snapshot() {
        let mut registry = Registry::new();
        registry.apply(&tx(CREATOR, "alice", "p1", "House"));
        registry.apply(&tx("alice", "bob", "p1", ""));
        let prop = registry.get("p1").unwrap();
        assert_eq!(prop.owner, "bob");
        assert!(prop.description.is_empty());
    }

    #[test]
    fn replay_folds_blocks_in_order() {
        let mut b1 = Block::with_timestamp(1, "prev".into(), vec![tx(CREATOR, "a", "p1", "")], 1);
        b1.hash = b1.compute_hash();
        let b2 = Block::with_timestamp(2, b1.hash.clone(), vec![tx(CREATOR, "b", "p2", "")], 2);
        let registry = Registry::replay(&[b1, b2]);
        assert_eq!(registry.get("p1").unwrap().owner, "a");
        assert_eq!(registry.get("p2").unwrap().owner, "b");
        assert!(!registry.contains("p3"));
    }
}
