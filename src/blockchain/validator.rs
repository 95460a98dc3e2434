use log::warn;

use super::{Block, ROOT_PREV_HASH};
use crate::error::ChainFault;

/// Walk the chain and report the first integrity violation.
///
/// Checks the genesis header, index contiguity, the link of every block to
/// its predecessor, and that every cached hash reproduces from content.
/// Proof-of-work targets are not re-checked: blocks do not record the
/// difficulty they were sealed at.
pub fn verify_chain(chain: &[Block]) -> Result<(), ChainFault> {
    let result = walk(chain);
    if let Err(fault) = &result {
        warn!("VALIDATOR - chain of {} blocks rejected: {}", chain.len(), fault);
    }
    result
}

pub fn is_valid_chain(chain: &[Block]) -> bool {
    verify_chain(chain).is_ok()
}

fn walk(chain: &[Block]) -> Result<(), ChainFault> {
    let genesis = chain.first().ok_or(ChainFault::Empty)?;
    if genesis.index != 0 || genesis.prev_hash != ROOT_PREV_HASH {
        return Err(ChainFault::MalformedGenesis);
    }
    if !genesis.has_consistent_hash() {
        return Err(ChainFault::HashMismatch { index: 0 });
    }

    for (position, pair) in chain.windows(2).enumerate() {
        let (prev, current) = (&pair[0], &pair[1]);
        let position = position + 1;

        if current.index != position as u64 {
            return Err(ChainFault::IndexGap {
                position,
                found: current.index,
            });
        }
        if current.prev_hash != prev.hash {
            return Err(ChainFault::BrokenLink {
                index: current.index,
            });
        }
        if !current.has_consistent_hash() {
            return Err(ChainFault::HashMismatch {
                index: current.index,
            });
        }
    }

    Ok(())
}
