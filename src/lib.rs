#![doc(test(attr(deny(warnings))))]

//! Cashflow Core turns monthly income and expense line items into a
//! positioned Sankey scene, together with the editor state, persistence,
//! and SVG rendering glue needed to drive a cash-flow visualizer.

pub mod cli;
pub mod config;
pub mod currency;
pub mod domain;
pub mod editor;
pub mod errors;
pub mod layout;
pub mod render;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Cashflow Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
