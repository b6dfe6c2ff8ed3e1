//! Relationship module - the directed follow graph.
//!
//! Follower and following counts are never stored; they are derived from
//! the edges at read time.

mod follow;

pub use follow::{FollowEdge, FollowKey, MemberSummary};
