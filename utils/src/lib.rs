//! Shared utilities for the cep wallet.

pub mod currency;
pub mod logging;

pub use currency::{format_amount, format_compact_currency, format_currency, format_currency_str};
pub use logging::{init_tracing, init_tracing_with};
