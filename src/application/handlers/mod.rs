//! Application handlers.
//!
//! Command and query handlers that orchestrate identity operations.

pub mod identity;
