//! Wallet core for cep.
//!
//! Couples the pure ledger state machine with durable storage: load once at
//! startup, apply transitions in memory, write the serialized state after
//! every mutation. This is the crate a front end (CLI, mobile shell)
//! drives.

pub mod session;

pub use session::{WalletSession, WALLET_DATA_KEY};
