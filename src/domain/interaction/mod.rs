//! Interaction module - polymorphic reactions (likes) and toggle semantics.

mod errors;
mod record;
mod target_kind;

pub use errors::EngagementError;
pub use record::{Interaction, InteractionKey, ToggleOutcome, ToggleState};
pub use target_kind::TargetKind;
