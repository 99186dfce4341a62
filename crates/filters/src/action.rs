use std::fmt;

/// Polarity of a rule.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RuleKind {
    /// Mark matching paths as excluded (`path-exclude`).
    Exclude,
    /// Clear the exclusion mark on matching paths (`path-include`).
    Include,
}

impl RuleKind {
    /// Maps a configuration option keyword onto a rule kind.
    ///
    /// Returns `None` for every other dpkg option so callers can skip the line.
    ///
    /// # Examples
    /// ```
    /// use filters::RuleKind;
    /// assert_eq!(RuleKind::from_option("path-exclude"), Some(RuleKind::Exclude));
    /// assert_eq!(RuleKind::from_option("force-unsafe-io"), None);
    /// ```
    #[must_use]
    pub fn from_option(option: &str) -> Option<Self> {
        match option {
            "path-exclude" => Some(Self::Exclude),
            "path-include" => Some(Self::Include),
            _ => None,
        }
    }

    /// Returns the configuration keyword for the kind.
    #[must_use]
    pub const fn option(self) -> &'static str {
        match self {
            Self::Exclude => "path-exclude",
            Self::Include => "path-include",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.option())
    }
}

#[cfg(test)]
mod tests {
    use super::RuleKind;

    #[test]
    fn display_variants_match_option_keywords() {
        let cases = [
            (RuleKind::Exclude, "path-exclude"),
            (RuleKind::Include, "path-include"),
        ];

        for (kind, expected) in cases {
            assert_eq!(kind.to_string(), expected);
            assert_eq!(RuleKind::from_option(expected), Some(kind));
        }
    }

    #[test]
    fn option_keywords_are_case_sensitive() {
        assert_eq!(RuleKind::from_option("PATH-EXCLUDE"), None);
        assert_eq!(RuleKind::from_option("path-exclude:"), None);
        assert_eq!(RuleKind::from_option(""), None);
    }
}
