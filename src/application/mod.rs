//! Application layer - Services, Commands, and Handlers.
//!
//! The engagement side is exposed as stateless services over the ports
//! (`InteractionEngine`, `RelationshipGraph`, `ChannelAggregator`). The
//! identity side follows the command/handler split in `handlers::identity`,
//! backed by `CredentialService`, `TokenService` and `SessionGate`.

mod channel_aggregator;
mod credentials;
pub mod handlers;
mod interaction_engine;
mod relationship_graph;
mod session_gate;
mod toggle;
mod tokens;

pub use channel_aggregator::ChannelAggregator;
pub use credentials::{CredentialService, MAX_PASSWORD_LENGTH};
pub use interaction_engine::InteractionEngine;
pub use relationship_graph::RelationshipGraph;
pub use session_gate::SessionGate;
pub use toggle::{toggle, ToggleStore};
pub use tokens::{TokenLifetimes, TokenPair, TokenService};
