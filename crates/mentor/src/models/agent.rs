use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Identity tag for the three responders in the system
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AgentKind {
    Tutor,
    Math,
    Physics,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_serialization_roundtrip() {
        let serialized = serde_json::to_string(&AgentKind::Math).unwrap();
        assert_eq!(serialized, "\"math\"");
        let deserialized: AgentKind = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, AgentKind::Math);
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(AgentKind::Physics.to_string(), "physics");
        assert_eq!(AgentKind::from_str("TUTOR").unwrap(), AgentKind::Tutor);
    }
}
