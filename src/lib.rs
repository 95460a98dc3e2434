//! Append-only property-ownership ledger: proof-of-work sealed blocks of
//! transfer transactions plus a derived current-owner registry, with a thin
//! actix-web shell in [`api`].

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod transaction;

pub use blockchain::{Block, BlockSummary, Ledger};
pub use error::{ChainFault, PropertyNotFound, SealError, TxRejection};
pub use transaction::{Property, Transaction};
