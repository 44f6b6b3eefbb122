//! Type-safe identifiers for browser entities.
//!
//! Newtype wrappers prevent mixing incompatible IDs at compile time.
//! The only identifier this crate handles is the browser tab ID; on the
//! wire the peer may send it as either a JSON number or a numeric string,
//! so [`TabId::from_wire`] coerces both.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

// ============================================================================
// TabId
// ============================================================================

/// Browser tab identifier.
///
/// Assigned by the browser; unique within a browser session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(u32);

impl TabId {
    /// Creates a tab ID from a raw browser value.
    #[inline]
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Coerces a wire value into a tab ID.
    ///
    /// The peer sends `tab_id` as either an integer or a numeric string;
    /// both forms are accepted. Anything else is a framing error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Framing`] if the value is neither a non-negative
    /// integer nor a string parseable as one.
    pub fn from_wire(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .and_then(|id| u32::try_from(id).ok())
                .map(Self)
                .ok_or_else(|| Error::framing(format!("tab_id out of range: {n}"))),
            Value::String(s) => s
                .parse::<u32>()
                .map(Self)
                .map_err(|_| Error::framing(format!("tab_id not numeric: {s:?}"))),
            other => Err(Error::framing(format!(
                "tab_id has unexpected type: {other}"
            ))),
        }
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

impl From<u32> for TabId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_tab_id_display() {
        assert_eq!(TabId::new(7).to_string(), "tab-7");
    }

    #[test]
    fn test_from_wire_integer() {
        let id = TabId::from_wire(&json!(7)).expect("integer tab_id");
        assert_eq!(id, TabId::new(7));
    }

    #[test]
    fn test_from_wire_string() {
        let id = TabId::from_wire(&json!("7")).expect("string tab_id");
        assert_eq!(id, TabId::new(7));
    }

    #[test]
    fn test_from_wire_rejects_non_numeric_string() {
        let err = TabId::from_wire(&json!("seven")).unwrap_err();
        assert!(matches!(err, Error::Framing { .. }));
    }

    #[test]
    fn test_from_wire_rejects_negative() {
        let err = TabId::from_wire(&json!(-1)).unwrap_err();
        assert!(matches!(err, Error::Framing { .. }));
    }

    #[test]
    fn test_from_wire_rejects_other_types() {
        let err = TabId::from_wire(&json!({"id": 7})).unwrap_err();
        assert!(matches!(err, Error::Framing { .. }));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&TabId::new(3)).expect("serialize");
        assert_eq!(json, "3");
    }
}
