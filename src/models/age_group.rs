//! Age group model
//!
//! The two prenatal age brackets; only the magnesium target depends on them.

use serde::{Deserialize, Serialize};

/// Age bracket of the expectant mother, in years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AgeGroup {
    #[default]
    #[serde(rename = "18-30")]
    Age18To30,
    #[serde(rename = "31-47")]
    Age31To47,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 2] = [AgeGroup::Age18To30, AgeGroup::Age31To47];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Age18To30 => "18-30",
            AgeGroup::Age31To47 => "31-47",
        }
    }

    /// Parse from string, accepting an en dash as well as a hyphen
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized = s.trim().replace(['\u{2013}', '\u{2014}'], "-").replace(' ', "");
        match normalized.as_str() {
            "18-30" => Some(AgeGroup::Age18To30),
            "31-47" => Some(AgeGroup::Age31To47),
            _ => None,
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(AgeGroup::from_str("18-30"), Some(AgeGroup::Age18To30));
        assert_eq!(AgeGroup::from_str(" 31-47 "), Some(AgeGroup::Age31To47));
        assert_eq!(AgeGroup::from_str("18\u{2013}30"), Some(AgeGroup::Age18To30));
        assert_eq!(AgeGroup::from_str("31 - 47"), Some(AgeGroup::Age31To47));
        assert_eq!(AgeGroup::from_str("48-60"), None);
        assert_eq!(AgeGroup::from_str(""), None);
    }

    #[test]
    fn test_default_is_lower_bracket() {
        assert_eq!(AgeGroup::default(), AgeGroup::Age18To30);
    }

    #[test]
    fn test_serde_uses_bracket_strings() {
        let json = serde_json::to_string(&AgeGroup::Age31To47).unwrap();
        assert_eq!(json, "\"31-47\"");
        let parsed: AgeGroup = serde_json::from_str("\"18-30\"").unwrap();
        assert_eq!(parsed, AgeGroup::Age18To30);
    }
}
