//! The persistence bridge between the ledger and durable storage.
//!
//! A `WalletSession` owns a [`WalletLedger`] and a [`KeyValueStore`]. Every
//! mutating transition applies in memory first, then triggers an
//! asynchronous fire-and-forget write of the serialized state. A failed
//! write is logged and swallowed, so in-memory and persisted state may
//! diverge until the next successful write. Callers that need durability
//! confirmation use the `*_local` transition variants and await
//! [`WalletSession::persist`] themselves, instead of stacking a second
//! writer on top of the background one.

use std::sync::Arc;

use cep_ledger::{InitialData, LedgerError, WalletLedger};
use cep_store::{KeyValueStore, StoreError};
use cep_types::{Amount, Transaction, WalletState};

/// The single durable slot holding the serialized wallet state.
pub const WALLET_DATA_KEY: &str = "walletData";

/// A live wallet: in-memory ledger plus its durable backing slot.
///
/// Methods that mutate must run inside a tokio runtime, since the
/// background write is spawned onto it.
pub struct WalletSession {
    ledger: WalletLedger,
    store: Arc<dyn KeyValueStore>,
}

impl WalletSession {
    /// Open a session, reading the durable slot once.
    ///
    /// An absent or unparsable slot is never an error: the session starts
    /// from the default wallet state and logs what happened.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let ledger = match store.get(WALLET_DATA_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<WalletState>(&raw) {
                Ok(state) => WalletLedger::from_state(state),
                Err(e) => {
                    tracing::warn!("persisted wallet data is unreadable, starting fresh: {e}");
                    WalletLedger::new()
                }
            },
            Ok(None) => WalletLedger::new(),
            Err(e) => {
                tracing::warn!("wallet data read failed, starting fresh: {e}");
                WalletLedger::new()
            }
        };
        Self { ledger, store }
    }

    pub fn state(&self) -> &WalletState {
        self.ledger.state()
    }

    pub fn balance(&self) -> Amount {
        self.ledger.balance()
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    /// Rehydrate from an external payload. Does not write back; this is
    /// the load path, not a mutation of record.
    pub fn set_initial_data(&mut self, data: InitialData) {
        self.ledger.set_initial_data(data);
    }

    /// Record an outgoing transfer, then persist in the background.
    pub fn add_transaction(
        &mut self,
        receiver: &str,
        amount: &str,
    ) -> Result<Transaction, LedgerError> {
        let tx = self.add_transaction_local(receiver, amount)?;
        self.spawn_persist();
        Ok(tx)
    }

    /// Record an outgoing transfer without triggering the background write.
    ///
    /// For callers that await [`WalletSession::persist`] themselves; doing
    /// both would put two writers on the same slot at once.
    pub fn add_transaction_local(
        &mut self,
        receiver: &str,
        amount: &str,
    ) -> Result<Transaction, LedgerError> {
        Ok(self.ledger.add_transaction(receiver, amount)?.clone())
    }

    /// Replace the balance, then persist in the background.
    pub fn set_balance(&mut self, value: &str) -> Result<Amount, LedgerError> {
        let balance = self.set_balance_local(value)?;
        self.spawn_persist();
        Ok(balance)
    }

    /// Replace the balance without triggering the background write.
    pub fn set_balance_local(&mut self, value: &str) -> Result<Amount, LedgerError> {
        self.ledger.set_balance(value)
    }

    /// Restore the baseline state, then persist in the background.
    pub fn reset(&mut self) {
        self.reset_local();
        self.spawn_persist();
    }

    /// Restore the baseline state without triggering the background write.
    pub fn reset_local(&mut self) {
        self.ledger.reset();
    }

    /// Write the current state and wait for the result.
    pub async fn persist(&self) -> Result<(), StoreError> {
        let raw = serialize_state(self.ledger.state())?;
        self.store.set(WALLET_DATA_KEY, &raw).await
    }

    /// Fire-and-forget write of the current state. Failures are logged,
    /// never propagated, and never roll back the in-memory state.
    fn spawn_persist(&self) {
        let raw = match serialize_state(self.ledger.state()) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("wallet state serialization failed, skipping write: {e}");
                return;
            }
        };
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            if let Err(e) = store.set(WALLET_DATA_KEY, &raw).await {
                tracing::warn!("wallet data write failed, in-memory state retained: {e}");
            }
        });
    }
}

fn serialize_state(state: &WalletState) -> Result<String, StoreError> {
    serde_json::to_string(state).map_err(|e| StoreError::Serialization(e.to_string()))
}
