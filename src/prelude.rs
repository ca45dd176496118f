//! Prelude module for the date_partition crate.
//!
//! Re-exports the derive_more Display derive used across the crate.

#[allow(unused_imports)]
pub use derive_more::Display;
