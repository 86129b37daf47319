//! Serde support for conditions (feature-gated)
//!
//! A [`Condition`] serializes as its message, its severity and the messages
//! of every cause beneath it. Conditions are not deserializable, since the
//! concrete error types behind them are lost.
//!
//! ```rust,ignore
//! let condition = Condition::new(Warning::wrap(Condition::msg("disk full")));
//! let json = serde_json::to_string(&condition).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"message":"disk full","severity":"warning","causes":["disk full"]}"#
//! );
//! ```

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::condition::{Condition, Severity};

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Severity::Error => serializer.serialize_unit_variant("Severity", 0, "error"),
            Severity::Warning => serializer.serialize_unit_variant("Severity", 1, "warning"),
        }
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let causes: Vec<String> = self.chain().skip(1).map(|cause| cause.to_string()).collect();

        let mut state = serializer.serialize_struct("Condition", 3)?;
        state.serialize_field("message", &self.to_string())?;
        state.serialize_field("severity", &self.severity())?;
        state.serialize_field("causes", &causes)?;
        state.end()
    }
}
