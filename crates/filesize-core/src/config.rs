//! Walk configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::WalkError;
use crate::rules::{EXCLUDED_DIRECTORIES, EXCLUDED_FILES, ExclusionSet, Exclusions};

/// Configuration for a walk.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct WalkConfig {
    /// Root directory to walk.
    pub root: PathBuf,

    /// Rules matched against file names.
    #[builder(default = "default_excluded_files()")]
    #[serde(default = "default_excluded_files")]
    pub exclude_files: Vec<String>,

    /// Rules matched against directory names.
    #[builder(default = "default_excluded_dirs()")]
    #[serde(default = "default_excluded_dirs")]
    pub exclude_dirs: Vec<String>,

    /// Report every appended record to the progress sink.
    #[builder(default = "false")]
    #[serde(default)]
    pub verbose: bool,
}

fn default_excluded_files() -> Vec<String> {
    EXCLUDED_FILES.iter().map(|s| s.to_string()).collect()
}

fn default_excluded_dirs() -> Vec<String> {
    EXCLUDED_DIRECTORIES.iter().map(|s| s.to_string()).collect()
}

impl WalkConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }

        for rules in [&self.exclude_files, &self.exclude_dirs].into_iter().flatten() {
            ExclusionSet::new(rules).map_err(|e| e.to_string())?;
        }
        Ok(())
    }
}

impl WalkConfig {
    /// Create a new walk config builder.
    pub fn builder() -> WalkConfigBuilder {
        WalkConfigBuilder::default()
    }

    /// Create a config for walking `root` with the built-in exclusions.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            exclude_files: default_excluded_files(),
            exclude_dirs: default_excluded_dirs(),
            verbose: false,
        }
    }

    /// Compile both rule lists.
    pub fn exclusions(&self) -> Result<Exclusions, WalkError> {
        if self.root.as_os_str().is_empty() {
            return Err(WalkError::InvalidConfig {
                message: "Root path cannot be empty".to_string(),
            });
        }
        Ok(Exclusions::new(
            ExclusionSet::new(&self.exclude_files)?,
            ExclusionSet::new(&self.exclude_dirs)?,
        ))
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = WalkConfig::builder()
            .root("/home/user")
            .exclude_dirs(vec!["target".to_string()])
            .verbose(true)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert_eq!(config.exclude_dirs, vec!["target".to_string()]);
        assert_eq!(config.exclude_files, default_excluded_files());
        assert!(config.verbose);
    }

    #[test]
    fn test_config_simple() {
        let config = WalkConfig::new("/home/user");
        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert!(!config.verbose);
        assert_eq!(config.exclude_dirs.len(), EXCLUDED_DIRECTORIES.len());
    }

    #[test]
    fn test_builder_requires_root() {
        assert!(WalkConfig::builder().build().is_err());
        assert!(WalkConfig::builder().root("").build().is_err());
    }

    #[test]
    fn test_builder_rejects_malformed_rule() {
        let result = WalkConfig::builder()
            .root("/test")
            .exclude_files(vec!["[".to_string()])
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_exclusions_compile() {
        let mut config = WalkConfig::new("/test");
        let exclusions = config.exclusions().unwrap();
        assert!(exclusions.files.matches(".DS_Store"));
        assert!(exclusions.dirs.matches("node_modules"));

        config.exclude_dirs = vec!["*bad".to_string()];
        assert!(matches!(
            config.exclusions(),
            Err(WalkError::MalformedRule { .. })
        ));
    }
}
