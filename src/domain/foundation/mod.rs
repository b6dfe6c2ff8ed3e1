//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, authentication types, and the error
//! taxonomy that form the vocabulary of the Viewpoint domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedPrincipal};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{FollowEdgeId, InteractionId, PrincipalId, TargetId};
pub use timestamp::Timestamp;
