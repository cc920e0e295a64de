//! Wallet ledger: balance and transaction-log state transitions.
//!
//! Pure state logic: no storage, no clocks baked in (timestamps can be
//! injected), no UI concerns. The persistence bridge in `cep-wallet-core`
//! drives this crate and writes the resulting state out.

pub mod error;
pub mod ledger;

pub use error::LedgerError;
pub use ledger::{InitialData, WalletLedger, BASELINE_BALANCE};
