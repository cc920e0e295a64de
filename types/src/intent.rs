//! Parsed payment intents from scanned QR codes.
//!
//! Intents are transient: produced by the codec, consumed by the transfer
//! flow, never persisted.

use crate::Amount;

/// What a scanned code asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntentKind {
    /// A payment request, possibly carrying an amount.
    Payment,
    /// A contact share with no amount attached.
    Contact,
}

/// A parsed payment request.
#[derive(Clone, Debug, PartialEq)]
pub struct PaymentIntent {
    pub kind: IntentKind,
    pub recipient: String,
    pub amount: Option<Amount>,
    pub description: Option<String>,
}

impl PaymentIntent {
    pub fn payment(
        recipient: impl Into<String>,
        amount: Option<Amount>,
        description: Option<String>,
    ) -> Self {
        Self {
            kind: IntentKind::Payment,
            recipient: recipient.into(),
            amount,
            description,
        }
    }

    pub fn contact(recipient: impl Into<String>) -> Self {
        Self {
            kind: IntentKind::Contact,
            recipient: recipient.into(),
            amount: None,
            description: None,
        }
    }

    /// An intent is actionable only when a recipient was extracted.
    pub fn is_valid(&self) -> bool {
        !self.recipient.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_requires_recipient() {
        assert!(PaymentIntent::contact("05551234567").is_valid());
        assert!(!PaymentIntent::payment("", None, None).is_valid());
    }

    #[test]
    fn contact_carries_no_amount() {
        let intent = PaymentIntent::contact("05551234567");
        assert_eq!(intent.kind, IntentKind::Contact);
        assert_eq!(intent.amount, None);
        assert_eq!(intent.description, None);
    }
}
