//! Weather phenomenon categorization
//!
//! Free-text phenomenon descriptions from the station feed are mapped to a
//! coarse category by case-insensitive keyword matching. The keyword groups
//! are ordered data, not control flow: the first group with a keyword
//! contained in the text wins, so a phrase holding both a snow and a shower
//! keyword categorizes as snow/sleet.

use serde::{Deserialize, Serialize};

/// Coarse phenomenon category derived from free text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhenomenonCategory {
    None,
    Rain,
    SnowSleet,
    Forbidden,
}

impl std::fmt::Display for PhenomenonCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "NONE"),
            Self::Rain => write!(f, "RAIN"),
            Self::SnowSleet => write!(f, "SNOW_SLEET"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
        }
    }
}

impl std::str::FromStr for PhenomenonCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NONE" => Ok(Self::None),
            "RAIN" => Ok(Self::Rain),
            "SNOW_SLEET" => Ok(Self::SnowSleet),
            "FORBIDDEN" => Ok(Self::Forbidden),
            other => Err(format!("Unknown phenomenon category: {}", other)),
        }
    }
}

/// Keyword groups in match precedence order. Snow/sleet outranks rain so
/// that e.g. "Light snow shower" lands in SNOW_SLEET, not RAIN.
const KEYWORD_GROUPS: &[(PhenomenonCategory, &[&str])] = &[
    (PhenomenonCategory::SnowSleet, &["snow", "sleet"]),
    (PhenomenonCategory::Rain, &["rain", "shower", "drizzle"]),
    (PhenomenonCategory::Forbidden, &["glaze", "hail", "thunder"]),
];

/// Maps phenomenon free text to a category.
pub struct PhenomenonClassifier {
    groups: &'static [(PhenomenonCategory, &'static [&'static str])],
}

impl PhenomenonClassifier {
    pub const fn new() -> Self {
        Self {
            groups: KEYWORD_GROUPS,
        }
    }

    /// Classify a phenomenon description. Empty text yields `None`.
    pub fn classify(&self, text: &str) -> PhenomenonCategory {
        if text.is_empty() {
            return PhenomenonCategory::None;
        }

        let lowered = text.to_lowercase();
        for (category, keywords) in self.groups {
            if keywords.iter().any(|kw| lowered.contains(kw)) {
                return *category;
            }
        }

        PhenomenonCategory::None
    }
}

impl Default for PhenomenonClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_snow_and_sleet() {
        let classifier = PhenomenonClassifier::new();
        assert_eq!(
            classifier.classify("Heavy snowfall"),
            PhenomenonCategory::SnowSleet
        );
        assert_eq!(
            classifier.classify("Light sleet"),
            PhenomenonCategory::SnowSleet
        );
        assert_eq!(
            classifier.classify("Light snow"),
            PhenomenonCategory::SnowSleet
        );
    }

    #[test]
    fn classifies_rain_shower_drizzle() {
        let classifier = PhenomenonClassifier::new();
        assert_eq!(classifier.classify("Moderate rain"), PhenomenonCategory::Rain);
        assert_eq!(classifier.classify("Heavy shower"), PhenomenonCategory::Rain);
        assert_eq!(classifier.classify("Drizzle"), PhenomenonCategory::Rain);
    }

    #[test]
    fn classifies_forbidden_phenomena() {
        let classifier = PhenomenonClassifier::new();
        assert_eq!(classifier.classify("Glaze"), PhenomenonCategory::Forbidden);
        assert_eq!(classifier.classify("Hail"), PhenomenonCategory::Forbidden);
        assert_eq!(classifier.classify("Thunder"), PhenomenonCategory::Forbidden);
        assert_eq!(
            classifier.classify("Thunderstorm"),
            PhenomenonCategory::Forbidden
        );
    }

    #[test]
    fn snow_outranks_shower_in_mixed_text() {
        let classifier = PhenomenonClassifier::new();
        assert_eq!(
            classifier.classify("Light snow shower"),
            PhenomenonCategory::SnowSleet
        );
        assert_eq!(
            classifier.classify("Moderate snow shower"),
            PhenomenonCategory::SnowSleet
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        let classifier = PhenomenonClassifier::new();
        assert_eq!(classifier.classify("SNOW"), PhenomenonCategory::SnowSleet);
        assert_eq!(classifier.classify("rAiN"), PhenomenonCategory::Rain);
    }

    #[test]
    fn unknown_or_empty_text_is_none() {
        let classifier = PhenomenonClassifier::new();
        assert_eq!(classifier.classify(""), PhenomenonCategory::None);
        assert_eq!(classifier.classify("Clear"), PhenomenonCategory::None);
        assert_eq!(classifier.classify("Few clouds"), PhenomenonCategory::None);
        assert_eq!(classifier.classify("Mist"), PhenomenonCategory::None);
    }
}
