//! Correlation ids for grouping log events
//!
//! Every shell menu operation and every non-interactive command runs inside
//! the span of a fresh [`RequestContext`], so all events it produces carry
//! the same `request_id`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Time-ordered (UUIDv7) id of one operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RequestId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Correlation data for one operation
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: RequestId,
    /// What started the operation: a CLI subcommand or shell menu entry
    pub origin: &'static str,
}

impl RequestContext {
    pub fn new(origin: &'static str) -> Self {
        Self {
            request_id: RequestId::new(),
            origin,
        }
    }

    /// Span carrying `request_id` and `origin`; enter it for the operation
    pub fn span(&self) -> tracing::Span {
        tracing::info_span!(
            "operation",
            request_id = %self.request_id,
            origin = self.origin
        )
    }
}
