#![doc(test(attr(deny(warnings))))]

//! PowerRent Core reconciles the finances of a small equipment-rental business:
//! payments and credit notes are projected into a movement log, quotations move
//! through their lifecycle, and balances are aggregated over calendar periods.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

pub use crate::core::{FinanceManager, FixedClock, SystemClock};
pub use errors::{FinanceError, Result};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and logs the build metadata once.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!(build = %utils::build_info::current(), "PowerRent Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
