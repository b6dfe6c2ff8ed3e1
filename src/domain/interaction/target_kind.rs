//! The closed set of things a principal can react to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::DomainError;

/// Kind of interaction target.
///
/// Adding a kind means adding a variant here; there is no string-typed
/// fallback, so unknown tags fail at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    ContentItem,
    Comment,
    Post,
}

impl TargetKind {
    pub const ALL: [TargetKind; 3] = [TargetKind::ContentItem, TargetKind::Comment, TargetKind::Post];

    /// Stable tag used on the wire and in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::ContentItem => "content_item",
            TargetKind::Comment => "comment",
            TargetKind::Post => "post",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "content_item" => Ok(TargetKind::ContentItem),
            "comment" => Ok(TargetKind::Comment),
            "post" => Ok(TargetKind::Post),
            other => Err(DomainError::validation(
                "target_kind",
                format!("Unknown target kind '{}'", other),
            )),
        }
    }
}
