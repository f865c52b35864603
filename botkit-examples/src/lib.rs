//! # botkit-examples
//!
//! Recipe handlers, one module per bot binary. Each module exposes a `chain` builder so the
//! binaries stay a few lines long and the handlers can be driven by tests with a mock [`Bot`].
//!
//! [`Bot`]: botkit_core::Bot

pub mod app;
pub mod recipes;
pub mod reply;

pub use app::run_bot;
