//! Contract bindings for on-chain reads

pub mod erc20;

pub use erc20::*;
