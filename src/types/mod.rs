//! Data model for the engine wire protocol

pub mod context;
pub mod order;

pub use context::*;
pub use order::*;
