//! HTTP adapter - REST API over the application services.
//!
//! - `identity` - registration, sessions and account management
//! - `engagement` - likes, subscriptions and channel statistics

pub mod engagement;
pub mod error;
pub mod extractors;
pub mod identity;
mod router;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use router::{api_router, with_middleware};
pub use state::{Adapters, AppState, SessionSettings};
