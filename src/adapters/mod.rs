//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - Argon2 credential hashing and JWT signing
//! - `http` - axum REST API
//! - `media` - local filesystem media storage
//! - `memory` - in-memory stores for tests and local development
//! - `postgres` - PostgreSQL repositories and content catalog

pub mod auth;
pub mod http;
pub mod media;
pub mod memory;
pub mod postgres;
