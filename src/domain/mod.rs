//! Domain layer - Pure business logic with no external dependencies.
//!
//! This layer contains:
//! - Value objects and identifiers (foundation)
//! - Principals with credentials and refresh-token state
//! - Interactions (likes) over a closed set of target kinds
//! - The follow graph and channel read models

pub mod channel;
pub mod foundation;
pub mod interaction;
pub mod principal;
pub mod relationship;
