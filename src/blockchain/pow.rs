use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{Block, HASH_HEX_LEN};
use crate::error::SealError;

/// Winning proof-of-work for a candidate block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seal {
    pub nonce: u64,
    pub hash: String,
    pub attempts: u64,
}

/// Shared stop flag for an in-flight proof-of-work search.
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// True if both handles drive the same search.
    pub fn same_as(&self, other: &CancelToken) -> bool {
        Arc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}

/// Reject difficulties the hex digest can never satisfy.
pub fn check_difficulty(difficulty: u32) -> Result<(), SealError> {
    if difficulty as usize >= HASH_HEX_LEN {
        return Err(SealError::InvalidDifficulty {
            difficulty,
            max: HASH_HEX_LEN as u32,
        });
    }
    Ok(())
}

/// True if `hash` starts with `difficulty` zero characters.
pub fn meets_difficulty(hash: &str, difficulty: u32) -> bool {
    hash.len() >= difficulty as usize && hash.bytes().take(difficulty as usize).all(|b| b == b'0')
}

/// Perform Proof-of-Work by finding the first nonce, counting up from 0,
/// whose hash starts with `difficulty` leading zeros (in hex).
/// On success the block carries the winning `nonce` and `hash`.
pub fn mine(block: &mut Block, difficulty: u32) -> Result<Seal, SealError> {
    search(block, difficulty, None)
}

/// Same as [`mine`], but gives up with [`SealError::Cancelled`] once `cancel`
/// is triggered. The flag is checked before every attempt.
pub fn mine_with_cancel(
    block: &mut Block,
    difficulty: u32,
    cancel: &CancelToken,
) -> Result<Seal, SealError> {
    search(block, difficulty, Some(cancel))
}

fn search(
    block: &mut Block,
    difficulty: u32,
    cancel: Option<&CancelToken>,
) -> Result<Seal, SealError> {
    check_difficulty(difficulty)?;

    let mut attempts: u64 = 0;
    block.nonce = 0;
    loop {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(SealError::Cancelled { attempts });
        }

        block.hash = block.compute_hash();
        attempts = attempts.saturating_add(1);
        if meets_difficulty(&block.hash, difficulty) {
            return Ok(Seal {
                nonce: block.nonce,
                hash: block.hash.clone(),
                attempts,
            });
        }

        block.nonce = block
            .nonce
            .checked_add(1)
            .ok_or(SealError::NonceExhausted)?;
    }
}
