//! Text-based transformations using regex patterns.

use super::Transform;
use crate::error::Result;
use regex::Regex;
use std::path::Path;

/// Whole-content substitution: every leftmost, non-overlapping match is replaced.
pub struct TextTransform {
    kind: TextTransformKind,
}

enum TextTransformKind {
    Replace { pattern: Regex, replacement: String },
    ReplaceLiteral { needle: String, replacement: String },
}

impl TextTransform {
    /// Creates a regex replacement transform.
    pub fn replace(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self::replace_regex(Regex::new(pattern)?, replacement))
    }

    /// Creates a replacement transform from a pre-compiled regex.
    pub fn replace_regex(pattern: Regex, replacement: impl Into<String>) -> Self {
        Self {
            kind: TextTransformKind::Replace {
                pattern,
                replacement: replacement.into(),
            },
        }
    }

    /// Creates a literal string replacement transform. `$` in the replacement is not expanded.
    pub fn replace_literal(needle: &str, replacement: &str) -> Self {
        Self {
            kind: TextTransformKind::ReplaceLiteral {
                needle: needle.to_string(),
                replacement: replacement.to_string(),
            },
        }
    }

    /// Rewrites `source`, returning the new text.
    pub fn rewrite(&self, source: &str) -> String {
        match &self.kind {
            TextTransformKind::Replace {
                pattern,
                replacement,
            } => pattern
                .replace_all(source, replacement.as_str())
                .into_owned(),
            TextTransformKind::ReplaceLiteral {
                needle,
                replacement,
            } => {
                if needle.is_empty() {
                    return source.to_string();
                }
                source.replace(needle.as_str(), replacement)
            }
        }
    }
}

impl Transform for TextTransform {
    fn apply(&self, source: &str, _path: &Path) -> Result<String> {
        Ok(self.rewrite(source))
    }

    fn describe(&self) -> String {
        match &self.kind {
            TextTransformKind::Replace {
                pattern,
                replacement,
            } => {
                format!("Replace pattern '{}' with '{}'", pattern.as_str(), replacement)
            }
            TextTransformKind::ReplaceLiteral {
                needle,
                replacement,
            } => {
                format!("Replace literal '{}' with '{}'", needle, replacement)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_all_matches_with_captures() {
        let t = TextTransform::replace(r"revert([A-Z]\w*)\(\);", "revert ${1}();").unwrap();
        let out = t.rewrite("revertFoo(); x; revertBar();");
        assert_eq!(out, "revert Foo(); x; revert Bar();");
    }

    #[test]
    fn test_adjacent_matches_do_not_overlap() {
        let t = TextTransform::replace("aa", "b").unwrap();
        assert_eq!(t.rewrite("aaaaa"), "bba");
    }

    #[test]
    fn test_literal_keeps_dollar_signs() {
        let t = TextTransform::replace_literal("price", "$1 price");
        assert_eq!(t.rewrite("price"), "$1 price");
    }

    #[test]
    fn test_empty_literal_is_a_no_op() {
        let t = TextTransform::replace_literal("", "x");
        assert_eq!(t.rewrite("abc"), "abc");
    }

    #[test]
    fn test_describe() {
        let t = TextTransform::replace_literal("a", "b");
        assert_eq!(t.describe(), "Replace literal 'a' with 'b'");
    }
}
