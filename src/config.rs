//! Serializable description of a rewrite run.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, RewriteError};
use crate::rewrite::Rewriter;
use crate::rules::{self, DEFAULT_PRAGMA_FROM, DEFAULT_PRAGMA_TO, SOLIDITY_SUFFIX};
use crate::transform::{TextTransform, TransformBuilder};

/// One substitution rule in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RuleSpec {
    /// `revertFoo();` -> `revert Foo();`
    #[serde(rename = "revert_spacing")]
    RevertSpacing,

    /// `pragma solidity <from>;` -> `pragma solidity <to>;`
    #[serde(rename = "pragma_update")]
    PragmaUpdate {
        #[serde(default = "default_pragma_from")]
        from: String,
        #[serde(default = "default_pragma_to")]
        to: String,
    },

    /// Regex replacement; `replacement` may reference captures.
    #[serde(rename = "replace_pattern")]
    ReplacePattern { pattern: String, replacement: String },

    #[serde(rename = "replace_literal")]
    ReplaceLiteral { from: String, to: String },
}

fn default_pragma_from() -> String {
    DEFAULT_PRAGMA_FROM.to_string()
}

fn default_pragma_to() -> String {
    DEFAULT_PRAGMA_TO.to_string()
}

fn default_extension() -> String {
    SOLIDITY_SUFFIX.to_string()
}

fn default_report() -> String {
    "Fixed ".to_string()
}

impl RuleSpec {
    /// Compiles the rule.
    pub fn build(&self) -> Result<TextTransform> {
        match self {
            RuleSpec::RevertSpacing => rules::revert_spacing(),
            RuleSpec::PragmaUpdate { from, to } => Ok(rules::pragma_update(from, to)),
            RuleSpec::ReplacePattern {
                pattern,
                replacement,
            } => TextTransform::replace(pattern, replacement),
            RuleSpec::ReplaceLiteral { from, to } => Ok(TextTransform::replace_literal(from, to)),
        }
    }
}

/// A complete rewrite run, loadable from YAML or JSON.
///
/// # Example YAML
///
/// ```yaml
/// root: contracts/swap/periphery
/// extension: .sol
/// exclude:
///   - "**/test/**"
/// report: "Updated: "
/// done_marker: true
/// rules:
///   - type: pragma_update
///     from: "=0.8.15"
///     to: "^0.8.20"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteConfig {
    /// Directory to scan. Relative paths are resolved against the config file's directory.
    pub root: PathBuf,

    #[serde(default = "default_extension")]
    pub extension: String,

    /// Glob patterns, relative to `root`, of files to leave alone.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    /// Prefix of the line printed for each modified file.
    #[serde(default = "default_report")]
    pub report: String,

    /// Print `Done!` after the run completes.
    #[serde(default)]
    pub done_marker: bool,

    pub rules: Vec<RuleSpec>,
}

impl RewriteConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: default_extension(),
            exclude: Vec::new(),
            report: default_report(),
            done_marker: false,
            rules: Vec::new(),
        }
    }

    pub fn with_rule(mut self, rule: RuleSpec) -> Self {
        self.rules.push(rule);
        self
    }

    /// Loads a config, choosing the format from the file extension (`.json` or YAML otherwise).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.extension().is_some_and(|e| e == "json") {
            Self::from_json_str(&read_config(path)?)?
        } else {
            Self::from_yaml_str(&read_config(path)?)?
        };

        if config.root.is_relative()
            && let Some(parent) = path.parent()
        {
            config.root = parent.join(&config.root);
        }
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        write_config(path.as_ref(), content)
    }

    pub fn to_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        write_config(path.as_ref(), content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rules.is_empty() {
            return Err(RewriteError::InvalidConfig(
                "at least one rule is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Compiles every rule, in order.
    pub fn transform(&self) -> Result<TransformBuilder> {
        self.rules
            .iter()
            .try_fold(TransformBuilder::new(), |builder, rule| {
                Ok(builder.text(rule.build()?))
            })
    }

    /// Builds a rewriter for this config.
    pub fn rewriter(&self) -> Result<Rewriter> {
        self.validate()?;
        let transform = self.transform()?;
        Ok(Rewriter::in_dir(&self.root)
            .files(|f| f.suffix(&self.extension).excludes(&self.exclude))
            .transform(transform))
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| RewriteError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

fn write_config(path: &Path, content: String) -> Result<()> {
    std::fs::write(path, content).map_err(|source| RewriteError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}
