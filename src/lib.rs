//! Viewpoint - identity, engagement and channel statistics for a
//! video-sharing platform.
//!
//! Principals register and hold rotating refresh sessions, react to content
//! items, comments and posts, follow each other as channels, and read
//! aggregated channel snapshots.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
