//! HTTP adapter for likes, subscriptions and channel statistics.

pub mod dto;
pub mod handlers;
mod routes;

pub use routes::{dashboard_routes, like_routes, subscription_routes};
