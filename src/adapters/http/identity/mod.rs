//! HTTP adapter for user endpoints under `/api/v1/users`.

pub mod dto;
pub mod handlers;
mod routes;

pub use routes::user_routes;
