//! Error types for the SwapDesk terminal
//!
//! Uses `eyre` for ergonomic error handling with context.

pub use eyre::{eyre, Context, Report, Result};
