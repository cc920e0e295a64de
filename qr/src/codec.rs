//! Parse and generate QR payment payloads.
//!
//! Three wire shapes are recognized, tried in order:
//! 1. the `ceppay://pay?to=...&amount=...&desc=...` URI,
//! 2. a JSON object (`recipient`/`to`/`phone` field aliases),
//! 3. a bare Turkish mobile number, treated as a contact share.
//!
//! Parsing never panics on malformed input; anything unrecognizable
//! resolves to `None`.

use serde_json::{Map, Value};

use cep_types::{Amount, IntentKind, PaymentIntent};

use crate::percent::{percent_decode, percent_encode};

/// Fixed URI prefix of the payment scheme.
pub const PAYMENT_SCHEME: &str = "ceppay://pay";

/// Parse raw scanned text into a payment intent.
///
/// Returns `None` when the text matches none of the recognized shapes. A
/// recognized shape with no extractable recipient still returns `Some`;
/// callers check [`PaymentIntent::is_valid`] before acting on it.
pub fn parse_qr_payment_data(raw: &str) -> Option<PaymentIntent> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Some(rest) = raw.strip_prefix(PAYMENT_SCHEME) {
        return parse_payment_uri(rest);
    }
    if raw.starts_with('{') {
        return parse_payment_json(raw);
    }
    if is_phone_number(raw) {
        return Some(PaymentIntent::contact(raw));
    }
    None
}

/// Encode a payment request as the URI wire form.
///
/// `parse_qr_payment_data` recovers the recipient, amount, and description
/// exactly from the generated string.
pub fn generate_qr_payment_data(
    phone: &str,
    amount: Option<Amount>,
    description: Option<&str>,
) -> String {
    let mut data = format!("{}?to={}", PAYMENT_SCHEME, percent_encode(phone));
    if let Some(amount) = amount {
        data.push_str("&amount=");
        data.push_str(&amount.to_string());
    }
    if let Some(desc) = description.filter(|d| !d.is_empty()) {
        data.push_str("&desc=");
        data.push_str(&percent_encode(desc));
    }
    data
}

/// Whether the text is a Turkish mobile number: 10 digits, optionally
/// preceded by `0`, `90`, or `+90`.
pub fn is_phone_number(text: &str) -> bool {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match digits.len() {
        10 => true,
        11 => digits.starts_with('0'),
        12 => digits.starts_with("90"),
        _ => false,
    }
}

/// Parse the part after the `ceppay://pay` prefix.
fn parse_payment_uri(rest: &str) -> Option<PaymentIntent> {
    let query = match rest.strip_prefix('?') {
        Some(query) => query,
        // A bare "ceppay://pay" is a recognized but empty request.
        None if rest.is_empty() => "",
        // Longer scheme text ("ceppay://payment...") is not ours.
        None => return None,
    };

    let mut recipient = String::new();
    let mut amount = None;
    let mut description = None;
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = percent_decode(value);
        match key {
            "to" => recipient = value,
            // An unparsable amount is treated as absent, not an error.
            "amount" => amount = Amount::parse(&value),
            "desc" => description = Some(value).filter(|d| !d.is_empty()),
            _ => {}
        }
    }
    Some(PaymentIntent::payment(recipient, amount, description))
}

/// Parse the JSON wire shape. Malformed JSON resolves to `None`.
fn parse_payment_json(raw: &str) -> Option<PaymentIntent> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let obj = value.as_object()?;

    let recipient = first_string(obj, &["recipient", "to", "phone"]).unwrap_or_default();
    let amount = obj.get("amount").and_then(json_amount);
    let description = first_string(obj, &["description", "desc"]);
    let kind = match obj.get("type").and_then(|v| v.as_str()) {
        Some("contact") => IntentKind::Contact,
        _ => IntentKind::Payment,
    };

    Some(PaymentIntent {
        kind,
        recipient,
        amount,
        description,
    })
}

/// First present string field among the aliases.
fn first_string(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| obj.get(*key).and_then(|v| v.as_str()).map(str::to_string))
}

/// Amounts appear as JSON numbers or numeric strings.
fn json_amount(value: &Value) -> Option<Amount> {
    match value {
        Value::Number(n) => n.as_f64().and_then(Amount::from_f64),
        Value::String(s) => Amount::parse(s),
        _ => None,
    }
}
