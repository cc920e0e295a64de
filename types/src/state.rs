//! The wallet's aggregate state: balance plus transaction log.

use serde::{Deserialize, Serialize};

use crate::{Amount, Transaction};

/// Balance and transaction history, as persisted to the durable slot.
///
/// Transactions are kept in insertion order, which is chronological order
/// with the most recent entry last.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WalletState {
    pub balance: Amount,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl WalletState {
    pub fn new(balance: Amount) -> Self {
        Self {
            balance,
            transactions: Vec::new(),
        }
    }

    /// Sum of all recorded debits.
    pub fn debited_total(&self) -> Amount {
        self.transactions
            .iter()
            .fold(Amount::ZERO, |acc, tx| acc.saturating_add(tx.amount))
    }

    /// Whether the balance is consistent with the transaction log for a
    /// history that started at `initial` and was mutated only through the
    /// debit path: `balance == initial − Σ amounts`.
    pub fn is_consistent_from(&self, initial: Amount) -> bool {
        match initial.checked_sub(self.debited_total()) {
            Some(expected) => expected == self.balance,
            None => false,
        }
    }
}
