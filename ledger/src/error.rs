use thiserror::Error;

use cep_types::Amount;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("amount does not parse to a finite number: {0:?}")]
    InvalidAmount(String),

    #[error("amount must be positive: {0}")]
    NonPositiveAmount(Amount),

    #[error("balance arithmetic overflow")]
    BalanceOverflow,
}
