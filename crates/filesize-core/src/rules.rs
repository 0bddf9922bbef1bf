//! Exclusion rules for file and directory names.

use regex::Regex;

use crate::error::WalkError;

/// File names that are excluded by default.
pub const EXCLUDED_FILES: &[&str] = &[
    ".DS_Store",
    ".DS_Store?",
    ".Spotlight-V100",
    ".Trashes",
    "ehthumbs.db",
    "Thumbs.db",
];

/// Directory names that are excluded by default.
pub const EXCLUDED_DIRECTORIES: &[&str] = &[".git", "node_modules", "vendor"];

/// Returns true if any of `rules` finds a match anywhere within `name`.
pub fn matches(name: &str, rules: &[Regex]) -> bool {
    rules.iter().any(|rule| rule.is_match(name))
}

/// An ordered set of compiled exclusion rules.
///
/// Each rule is a regular expression searched for anywhere in an entry's
/// base name, so a plain literal such as `vendor` behaves as a substring
/// match. Rules are compiled up front; a malformed rule is rejected here and
/// never reaches the walk.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    rules: Vec<Regex>,
}

impl ExclusionSet {
    /// Compile a rule list.
    pub fn new<I, S>(rules: I) -> Result<Self, WalkError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = rules
            .into_iter()
            .map(|rule| {
                let rule = rule.as_ref();
                Regex::new(rule).map_err(|e| WalkError::MalformedRule {
                    rule: rule.to_string(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    /// A set that matches nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in file exclusions.
    pub fn default_files() -> Self {
        Self::builtin(EXCLUDED_FILES)
    }

    /// The built-in directory exclusions.
    pub fn default_dirs() -> Self {
        Self::builtin(EXCLUDED_DIRECTORIES)
    }

    fn builtin(rules: &[&str]) -> Self {
        // Built-in rules are known-good patterns.
        Self {
            rules: rules.iter().filter_map(|r| Regex::new(r).ok()).collect(),
        }
    }

    /// Check whether `name` is matched by any rule.
    pub fn matches(&self, name: &str) -> bool {
        matches(name, &self.rules)
    }

    /// Source text of each rule, in order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(Regex::as_str)
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// The pair of exclusion sets a walk runs with.
#[derive(Debug, Clone)]
pub struct Exclusions {
    /// Applied to regular files.
    pub files: ExclusionSet,
    /// Applied to directories.
    pub dirs: ExclusionSet,
}

impl Exclusions {
    /// Create from already compiled sets.
    pub fn new(files: ExclusionSet, dirs: ExclusionSet) -> Self {
        Self { files, dirs }
    }

    /// Exclude nothing.
    pub fn none() -> Self {
        Self::new(ExclusionSet::empty(), ExclusionSet::empty())
    }
}

impl Default for Exclusions {
    fn default() -> Self {
        Self::new(ExclusionSet::default_files(), ExclusionSet::default_dirs())
    }
}
