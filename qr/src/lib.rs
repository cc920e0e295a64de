//! QR payment codec for the cep wallet.
//!
//! Translates between raw scanned text and [`cep_types::PaymentIntent`]
//! values. The codec is pure string processing; camera access and QR
//! detection happen elsewhere and hand their decoded text in here.

pub mod codec;
mod percent;

pub use codec::{
    generate_qr_payment_data, is_phone_number, parse_qr_payment_data, PAYMENT_SCHEME,
};
