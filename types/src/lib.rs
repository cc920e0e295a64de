//! Fundamental types for the cep wallet.
//!
//! This crate defines the value types shared across every other crate in the
//! workspace: fixed-point amounts, transaction records, the wallet's
//! aggregate state, and parsed payment intents.

pub mod amount;
pub mod intent;
pub mod state;
pub mod transaction;

pub use amount::Amount;
pub use intent::{IntentKind, PaymentIntent};
pub use state::WalletState;
pub use transaction::Transaction;
