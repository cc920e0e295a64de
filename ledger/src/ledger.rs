//! The wallet ledger state machine.
//!
//! `WalletLedger` holds a [`WalletState`] and applies the four transitions:
//! hydrate (`set_initial_data`), debit (`add_transaction`), balance override
//! (`set_balance`), and wholesale reset. Transitions validate before they
//! mutate, so a failed transition leaves the state untouched. The ledger
//! does no I/O; persistence is orchestrated a layer above.
//!
//! Business rules such as "does the amount exceed the balance" are the
//! caller's responsibility; the ledger will happily drive a balance
//! negative if asked.

use chrono::{DateTime, Utc};

use cep_types::{Amount, Transaction, WalletState};

use crate::error::LedgerError;

/// Balance a fresh or reset wallet starts with.
pub const BASELINE_BALANCE: Amount = Amount::from_lira(1000);

/// Hydration payload with explicit optional fields. Missing fields fall
/// back to defaults, never errors.
#[derive(Clone, Debug, Default)]
pub struct InitialData {
    pub balance: Option<Amount>,
    pub transactions: Option<Vec<Transaction>>,
}

/// Balance plus transaction log, mutated only through transitions.
#[derive(Clone, Debug)]
pub struct WalletLedger {
    state: WalletState,
}

impl WalletLedger {
    /// A fresh ledger at the baseline balance with an empty log.
    pub fn new() -> Self {
        Self::with_balance(BASELINE_BALANCE)
    }

    pub fn with_balance(balance: Amount) -> Self {
        Self {
            state: WalletState::new(balance),
        }
    }

    /// Resume from previously persisted state.
    pub fn from_state(state: WalletState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &WalletState {
        &self.state
    }

    pub fn into_state(self) -> WalletState {
        self.state
    }

    pub fn balance(&self) -> Amount {
        self.state.balance
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.state.transactions
    }

    /// Hydrate from a partial payload. Absent fields take defaults: the
    /// baseline balance and an empty log.
    pub fn set_initial_data(&mut self, data: InitialData) {
        self.state.balance = data.balance.unwrap_or(BASELINE_BALANCE);
        self.state.transactions = data.transactions.unwrap_or_default();
    }

    /// Record an outgoing transfer, stamped with the current time.
    ///
    /// See [`WalletLedger::add_transaction_at`] for the failure contract.
    pub fn add_transaction(
        &mut self,
        receiver: &str,
        amount: &str,
    ) -> Result<&Transaction, LedgerError> {
        self.add_transaction_at(receiver, amount, Utc::now())
    }

    /// Record an outgoing transfer with an explicit timestamp.
    ///
    /// Parses `amount`; appends a transaction to the end of the log and
    /// debits the current balance. An amount that does not parse to a
    /// finite positive number fails the transition with the state
    /// untouched, so callers that drop the error observe the historical
    /// silent no-op.
    pub fn add_transaction_at(
        &mut self,
        receiver: &str,
        amount: &str,
        date: DateTime<Utc>,
    ) -> Result<&Transaction, LedgerError> {
        let amount = Amount::parse(amount)
            .ok_or_else(|| LedgerError::InvalidAmount(amount.to_string()))?;
        if !amount.is_positive() {
            return Err(LedgerError::NonPositiveAmount(amount));
        }
        let new_balance = self
            .state
            .balance
            .checked_sub(amount)
            .ok_or(LedgerError::BalanceOverflow)?;

        self.state.balance = new_balance;
        self.state
            .transactions
            .push(Transaction::new(receiver, amount, date));
        Ok(self
            .state
            .transactions
            .last()
            .expect("transaction was just pushed"))
    }

    /// Replace the balance. Unparsable input fails with the state untouched.
    pub fn set_balance(&mut self, value: &str) -> Result<Amount, LedgerError> {
        let balance =
            Amount::parse(value).ok_or_else(|| LedgerError::InvalidAmount(value.to_string()))?;
        self.state.balance = balance;
        Ok(balance)
    }

    /// Restore the baseline balance and clear the log.
    pub fn reset(&mut self) {
        self.state.balance = BASELINE_BALANCE;
        self.state.transactions.clear();
    }
}

impl Default for WalletLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fresh_ledger_starts_at_baseline() {
        let ledger = WalletLedger::new();
        assert_eq!(ledger.balance(), BASELINE_BALANCE);
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn transfer_debits_balance_and_appends() {
        // Initial balance 1000, transfer 150 to 05551234567.
        let mut ledger = WalletLedger::new();
        let tx = ledger.add_transaction("05551234567", "150").unwrap();
        assert_eq!(tx.receiver, "05551234567");
        assert_eq!(serde_json::to_value(tx.amount).unwrap(), "150.00");

        assert_eq!(ledger.balance(), Amount::from_lira(850));
        assert_eq!(ledger.transactions().len(), 1);
    }

    #[test]
    fn balance_equals_initial_minus_sum_of_debits() {
        let mut ledger = WalletLedger::new();
        for amount in ["150", "49.99", "0.01", "300.5"] {
            ledger.add_transaction("05551234567", amount).unwrap();
        }
        assert_eq!(ledger.transactions().len(), 4);
        assert_eq!(ledger.balance(), Amount::from_minor(49_950));
        assert!(ledger.state().is_consistent_from(BASELINE_BALANCE));
    }

    #[test]
    fn transactions_append_most_recent_last() {
        let mut ledger = WalletLedger::new();
        ledger.add_transaction("first", "1").unwrap();
        ledger.add_transaction("second", "2").unwrap();
        assert_eq!(ledger.transactions()[0].receiver, "first");
        assert_eq!(ledger.transactions()[1].receiver, "second");
    }

    #[test]
    fn invalid_amount_is_a_rejected_no_op() {
        let mut ledger = WalletLedger::new();
        let before = ledger.state().clone();

        let err = ledger.add_transaction("05551234567", "abc").unwrap_err();
        assert_eq!(err, LedgerError::InvalidAmount("abc".to_string()));
        assert_eq!(ledger.state(), &before);

        let err = ledger.add_transaction("05551234567", "NaN").unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
        assert_eq!(ledger.state(), &before);
    }

    #[test]
    fn zero_and_negative_amounts_are_rejected() {
        let mut ledger = WalletLedger::new();
        let before = ledger.state().clone();

        assert_eq!(
            ledger.add_transaction("05551234567", "0"),
            Err(LedgerError::NonPositiveAmount(Amount::ZERO))
        );
        assert_eq!(
            ledger.add_transaction("05551234567", "-50"),
            Err(LedgerError::NonPositiveAmount(Amount::from_lira(-50)))
        );
        assert_eq!(ledger.state(), &before);
    }

    #[test]
    fn overdraft_is_the_callers_problem() {
        // The ledger does not enforce sufficient funds.
        let mut ledger = WalletLedger::with_balance(Amount::from_lira(100));
        ledger.add_transaction("05551234567", "150").unwrap();
        assert_eq!(ledger.balance(), Amount::from_lira(-50));
    }

    #[test]
    fn each_debit_folds_over_the_previous_balance() {
        let mut ledger = WalletLedger::new();
        ledger.add_transaction("a", "100").unwrap();
        assert_eq!(ledger.balance(), Amount::from_lira(900));
        ledger.add_transaction("b", "100").unwrap();
        assert_eq!(ledger.balance(), Amount::from_lira(800));
    }

    #[test]
    fn set_balance_replaces_and_validates() {
        let mut ledger = WalletLedger::new();
        assert_eq!(ledger.set_balance("2500.75"), Ok(Amount::from_minor(250_075)));
        assert_eq!(ledger.balance(), Amount::from_minor(250_075));

        // Zero and negative are allowed here; only parsing is validated.
        assert_eq!(ledger.set_balance("0"), Ok(Amount::ZERO));
        assert_eq!(ledger.set_balance("-10"), Ok(Amount::from_lira(-10)));

        let err = ledger.set_balance("plenty").unwrap_err();
        assert_eq!(err, LedgerError::InvalidAmount("plenty".to_string()));
        assert_eq!(ledger.balance(), Amount::from_lira(-10));
    }

    #[test]
    fn reset_restores_baseline_regardless_of_prior_state() {
        let mut ledger = WalletLedger::new();
        ledger.add_transaction("05551234567", "999").unwrap();
        ledger.set_balance("7.77").unwrap();

        ledger.reset();
        assert_eq!(ledger.balance(), BASELINE_BALANCE);
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn set_initial_data_uses_defaults_for_missing_fields() {
        let mut ledger = WalletLedger::with_balance(Amount::ZERO);
        ledger.set_initial_data(InitialData::default());
        assert_eq!(ledger.balance(), BASELINE_BALANCE);
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn set_initial_data_applies_present_fields() {
        let date = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let txs = vec![Transaction::new("05551234567", Amount::from_lira(150), date)];

        let mut ledger = WalletLedger::new();
        ledger.set_initial_data(InitialData {
            balance: Some(Amount::from_lira(850)),
            transactions: Some(txs.clone()),
        });
        assert_eq!(ledger.balance(), Amount::from_lira(850));
        assert_eq!(ledger.transactions(), txs.as_slice());
    }

    #[test]
    fn persisted_state_rehydrates_deep_equal() {
        let mut ledger = WalletLedger::new();
        ledger.add_transaction("05551234567", "150").unwrap();
        ledger.add_transaction("05559876543", "12.34").unwrap();

        let json = serde_json::to_string(ledger.state()).unwrap();
        let restored: WalletState = serde_json::from_str(&json).unwrap();

        let mut fresh = WalletLedger::new();
        fresh.set_initial_data(InitialData {
            balance: Some(restored.balance),
            transactions: Some(restored.transactions),
        });
        assert_eq!(fresh.state(), ledger.state());
    }
}
