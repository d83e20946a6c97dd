use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Messaging strategy behind a generated variant.
///
/// The generator vocabulary drifts over time, so values outside the closed set
/// are preserved verbatim rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    Promotion,
    Benefit,
    Urgency,
    Emotion,
    Other(String),
}

impl Strategy {
    pub fn as_str(&self) -> &str {
        match self {
            Strategy::Promotion => "promotion",
            Strategy::Benefit => "benefit",
            Strategy::Urgency => "urgency",
            Strategy::Emotion => "emotion",
            Strategy::Other(raw) => raw,
        }
    }
}

impl From<&str> for Strategy {
    fn from(value: &str) -> Self {
        match value {
            "promotion" => Strategy::Promotion,
            "benefit" => Strategy::Benefit,
            "urgency" => Strategy::Urgency,
            "emotion" => Strategy::Emotion,
            other => Strategy::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Strategy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Strategy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Strategy::from(raw.as_str()))
    }
}

/// One candidate piece of generated content competing in an A/B test.
///
/// A variant has no persistent id; its position in the owning list is its
/// identity until the list changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub message: String,
    pub strategy: Strategy,
    #[serde(default)]
    pub tone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
}

/// Variant shape attached to the outbound test request. Dimensions are
/// deliberately dropped; the downstream bookkeeping only wants the copy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantPayload {
    pub message: String,
    pub strategy: Strategy,
    pub tone: String,
}

impl From<&Variant> for VariantPayload {
    fn from(variant: &Variant) -> Self {
        Self {
            message: variant.message.clone(),
            strategy: variant.strategy.clone(),
            tone: variant.tone.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_strategies_round_trip_lowercase() {
        for name in ["promotion", "benefit", "urgency", "emotion"] {
            let parsed = Strategy::from(name);
            assert_eq!(parsed.as_str(), name);
            assert!(!matches!(parsed, Strategy::Other(_)));
        }
    }

    #[test]
    fn test_unknown_strategy_is_preserved_verbatim() {
        let parsed: Strategy = serde_json::from_str("\"seasonal_fomo\"").unwrap();
        assert_eq!(parsed, Strategy::Other("seasonal_fomo".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"seasonal_fomo\"");
    }

    #[test]
    fn test_variant_without_dimensions_omits_key() {
        let variant = Variant {
            message: "Try our new menu".to_string(),
            strategy: Strategy::Promotion,
            tone: "friendly".to_string(),
            dimensions: None,
        };

        let json = serde_json::to_value(&variant).unwrap();
        assert!(json.get("dimensions").is_none());
    }
}
