//! Built-in rewrite rules for Solidity sources.

use crate::error::Result;
use crate::transform::{TextTransform, TransformBuilder};

/// Custom-error reverts written without a space, e.g. `revertInsufficientBalance();`.
pub const REVERT_PATTERN: &str = r"revert([A-Z][a-zA-Z0-9]*)\(\);";

/// Re-inserts the space and keeps the captured error name.
pub const REVERT_REPLACEMENT: &str = "revert ${1}();";

pub const DEFAULT_PRAGMA_FROM: &str = "=0.8.15";
pub const DEFAULT_PRAGMA_TO: &str = "^0.8.20";

/// Suffix of the files the presets apply to.
pub const SOLIDITY_SUFFIX: &str = ".sol";

/// Rewrites `revert<Error>();` to `revert <Error>();`.
pub fn revert_spacing() -> Result<TextTransform> {
    TextTransform::replace(REVERT_PATTERN, REVERT_REPLACEMENT)
}

/// Rewrites the exact line `pragma solidity <from>;` to `pragma solidity <to>;`.
pub fn pragma_update(from: &str, to: &str) -> TextTransform {
    TextTransform::replace_literal(&pragma_line(from), &pragma_line(to))
}

fn pragma_line(version: &str) -> String {
    format!("pragma solidity {version};")
}

/// A rule together with the way its results are reported.
pub struct RulePreset {
    pub transform: TransformBuilder,
    /// Prefix of the line printed for each modified file.
    pub report: String,
    /// Print `Done!` once the whole tree has been processed.
    pub done_marker: bool,
}

impl RulePreset {
    pub fn revert_spacing() -> Result<Self> {
        Ok(Self {
            transform: TransformBuilder::new().text(revert_spacing()?),
            report: "Fixed ".to_string(),
            done_marker: false,
        })
    }

    pub fn pragma_update(from: &str, to: &str) -> Self {
        Self {
            transform: TransformBuilder::new().text(pragma_update(from, to)),
            report: "Updated: ".to_string(),
            done_marker: true,
        }
    }
}
