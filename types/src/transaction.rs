//! Outgoing transfer records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Amount;

/// A single outgoing transfer, immutable once created.
///
/// The ledger only records debits; there is no incoming-transfer record
/// type. The `date` serializes as RFC 3339 so stored and reloaded
/// transactions compare equal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Counterparty identifier (phone number or contact handle).
    /// Format is not validated here; that is the caller's concern.
    pub receiver: String,
    /// Positive amount debited from the balance.
    pub amount: Amount,
    /// Creation timestamp (UTC).
    pub date: DateTime<Utc>,
}

impl Transaction {
    pub fn new(receiver: impl Into<String>, amount: Amount, date: DateTime<Utc>) -> Self {
        Self {
            receiver: receiver.into(),
            amount,
            date,
        }
    }
}
