//! Recommendation Category Value Object

use serde::{Deserialize, Serialize};

/// Risk category derived from the base score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Score below the balanced threshold.
    Conservative,
    /// Score at or above the balanced threshold.
    Balanced,
    /// Score at or above the aggressive threshold.
    Aggressive,
}

impl Category {
    /// Default threshold for `Aggressive`.
    pub const AGGRESSIVE_THRESHOLD: f64 = 0.7;
    /// Default threshold for `Balanced`.
    pub const BALANCED_THRESHOLD: f64 = 0.5;

    /// Categorize a score using the default thresholds.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        Self::from_score_with(score, Self::AGGRESSIVE_THRESHOLD, Self::BALANCED_THRESHOLD)
    }

    /// Categorize a score using explicit thresholds.
    #[must_use]
    pub fn from_score_with(score: f64, aggressive: f64, balanced: f64) -> Self {
        if score >= aggressive {
            Self::Aggressive
        } else if score >= balanced {
            Self::Balanced
        } else {
            Self::Conservative
        }
    }

    /// Parse a label from an external source; only the three exact
    /// category names are accepted (case-insensitive).
    #[must_use]
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "conservative" => Some(Self::Conservative),
            "balanced" => Some(Self::Balanced),
            "aggressive" => Some(Self::Aggressive),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conservative => write!(f, "Conservative"),
            Self::Balanced => write!(f, "Balanced"),
            Self::Aggressive => write!(f, "Aggressive"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0.95, Category::Aggressive)]
    #[test_case(0.7, Category::Aggressive)]
    #[test_case(0.69, Category::Balanced)]
    #[test_case(0.5, Category::Balanced)]
    #[test_case(0.49, Category::Conservative)]
    #[test_case(0.0, Category::Conservative)]
    fn category_thresholds(score: f64, expected: Category) {
        assert_eq!(Category::from_score(score), expected);
    }

    #[test]
    fn parse_label_accepts_only_valid_names() {
        assert_eq!(Category::parse_label("Aggressive"), Some(Category::Aggressive));
        assert_eq!(Category::parse_label(" balanced "), Some(Category::Balanced));
        assert_eq!(Category::parse_label("very aggressive"), None);
        assert_eq!(Category::parse_label("HOLD"), None);
    }
}
