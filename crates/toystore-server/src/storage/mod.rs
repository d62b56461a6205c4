//! Storage layer
//!
//! Everything lives in memory; there is no persistence across restarts.

pub mod memory;

pub use memory::{Store, StoreError};
