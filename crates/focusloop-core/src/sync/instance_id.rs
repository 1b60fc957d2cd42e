// Per-instance origin identity for broadcast loop prevention.
// Format: "engine-<uuid>"

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

const INSTANCE_ID_PREFIX: &str = "engine-";

/// Opaque identity of one engine instance. Fresh per instance - two
/// facades over the same persisted state still get distinct ids, which
/// is what lets each ignore the echo of its own broadcasts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    pub fn new() -> Self {
        Self(format!("{}{}", INSTANCE_ID_PREFIX, Uuid::new_v4()))
    }

    /// Accept an id from the wire. Rejects strings without the
    /// expected prefix so arbitrary foreign payloads don't pass as
    /// sync messages.
    pub fn parse(raw: &str) -> Option<Self> {
        let suffix = raw.strip_prefix(INSTANCE_ID_PREFIX)?;
        Uuid::parse_str(suffix).ok()?;
        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_prefixed() {
        let a = InstanceId::new();
        let b = InstanceId::new();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with(INSTANCE_ID_PREFIX));
        // prefix + 36-char uuid
        assert_eq!(a.as_str().len(), INSTANCE_ID_PREFIX.len() + 36);
    }

    #[test]
    fn parse_accepts_own_output() {
        let id = InstanceId::new();
        assert_eq!(InstanceId::parse(id.as_str()), Some(id));
    }

    #[test]
    fn parse_rejects_foreign_strings() {
        assert!(InstanceId::parse("not-an-engine-id").is_none());
        assert!(InstanceId::parse("engine-not-a-uuid").is_none());
        assert!(InstanceId::parse("").is_none());
    }
}
