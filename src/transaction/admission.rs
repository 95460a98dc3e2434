use log::{debug, warn};

use super::model::{CREATOR, Transaction};
use super::registry::Registry;
use crate::error::TxRejection;

/// Check a proposed transaction against the sealed registry and return it
/// normalized for the pending pool.
///
/// Only sealed state is consulted: two pending transfers of the same
/// property both pass if each is valid on its own, and the later one wins
/// when the block is sealed.
pub fn admit(registry: &Registry, mut tx: Transaction) -> Result<Transaction, TxRejection> {
    if let Err(reason) = check(registry, &mut tx) {
        warn!(
            "ADMISSION - rejected tx for property '{}' ({} -> {}): {}",
            tx.property.id, tx.from, tx.to, reason
        );
        return Err(reason);
    }

    debug!(
        "ADMISSION - accepted tx for property '{}' ({} -> {})",
        tx.property.id, tx.from, tx.to
    );
    Ok(tx)
}

fn check(registry: &Registry, tx: &mut Transaction) -> Result<(), TxRejection> {
    if tx.property.id.is_empty() {
        return Err(TxRejection::InvalidPropertyId);
    }
    if tx.to.is_empty() {
        return Err(TxRejection::InvalidAddresses);
    }

    match registry.get(&tx.property.id) {
        Some(current) => {
            if current.owner != tx.from {
                return Err(TxRejection::NotOwner {
                    expected: current.owner.clone(),
                    claimed: tx.from.clone(),
                });
            }
        }
        None => {
            // Unregistered: only a registration may mention it.
            if !tx.from.is_empty() && tx.from != CREATOR {
                return Err(TxRejection::CannotTransferNonexistentProperty);
            }
            tx.from = CREATOR.to_string();
        }
    }

    Ok(())
}
