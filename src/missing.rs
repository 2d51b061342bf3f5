use serde::{Deserialize, Serialize};

/// Cell values treated as missing unless configured otherwise
pub const DEFAULT_SENTINELS: &[&str] = &["", "NULL", "null"];

/// The set of literal cell values that count as missing.
///
/// Matching is exact: no trimming and no case folding. Every component that
/// asks "is this cell missing?" goes through one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissingSentinels {
    tokens: Vec<String>,
}

impl MissingSentinels {
    /// Build a sentinel set from arbitrary tokens. Duplicates are dropped.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self { tokens: Vec::new() };
        for token in tokens {
            set.add(token);
        }
        set
    }

    /// Check if a cell value is missing
    pub fn is_missing(&self, value: &str) -> bool {
        self.tokens.iter().any(|t| t == value)
    }

    /// Add a sentinel token
    pub fn add(&mut self, token: impl Into<String>) {
        let token = token.into();
        if !self.tokens.contains(&token) {
            self.tokens.push(token);
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl Default for MissingSentinels {
    fn default() -> Self {
        Self::new(DEFAULT_SENTINELS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sentinels() {
        let sentinels = MissingSentinels::default();
        assert!(sentinels.is_missing(""));
        assert!(sentinels.is_missing("NULL"));
        assert!(sentinels.is_missing("null"));
        assert!(!sentinels.is_missing("0"));
        assert!(!sentinels.is_missing("test"));
    }

    #[test]
    fn test_exact_match_only() {
        let sentinels = MissingSentinels::default();
        assert!(!sentinels.is_missing(" "));
        assert!(!sentinels.is_missing(" NULL"));
        assert!(!sentinels.is_missing("Null"));
        assert!(!sentinels.is_missing("NA"));
    }

    #[test]
    fn test_custom_sentinels() {
        let sentinels = MissingSentinels::new(["NA", "n/a", "NA"]);
        assert_eq!(sentinels.tokens().len(), 2);
        assert!(sentinels.is_missing("NA"));
        assert!(sentinels.is_missing("n/a"));
        assert!(!sentinels.is_missing(""));
    }

    #[test]
    fn test_serializes_as_list() {
        let json = serde_json::to_string(&MissingSentinels::default()).unwrap();
        assert_eq!(json, r#"["","NULL","null"]"#);
    }
}
