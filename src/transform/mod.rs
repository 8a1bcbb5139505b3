//! Content transformations applied to each matched file.

pub mod text;

pub use text::TextTransform;

use crate::error::{Result, RewriteError};
use std::path::{Path, PathBuf};

/// A transformation of a whole file's content.
pub trait Transform: Send + Sync {
    /// Applies the transformation to the given source text.
    fn apply(&self, source: &str, path: &Path) -> Result<String>;

    /// Returns a description of the transformation.
    fn describe(&self) -> String;
}

/// An ordered chain of transformations.
#[derive(Default)]
pub struct TransformBuilder {
    transforms: Vec<Box<dyn Transform>>,
}

impl TransformBuilder {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a regex replacement. The replacement may reference captures (`$1`, `${name}`).
    pub fn replace_pattern(self, pattern: &str, replacement: &str) -> Result<Self> {
        Ok(self.text(TextTransform::replace(pattern, replacement)?))
    }

    /// Adds a literal string replacement.
    pub fn replace_literal(self, needle: &str, replacement: &str) -> Self {
        self.text(TextTransform::replace_literal(needle, replacement))
    }

    /// Adds an already-built text transform.
    pub fn text(mut self, transform: TextTransform) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    /// Adds a custom transformation.
    pub fn custom<T: Transform + 'static>(mut self, transform: T) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    /// Applies all transformations to the source in order.
    pub fn apply(&self, source: &str, path: &Path) -> Result<String> {
        let mut result = source.to_string();
        for transform in &self.transforms {
            result = transform.apply(&result, path)?;
        }
        Ok(result)
    }

    /// Returns descriptions of all transformations.
    pub fn describe(&self) -> Vec<String> {
        self.transforms.iter().map(|t| t.describe()).collect()
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

/// A file whose content was rewritten.
#[derive(Debug, Clone)]
pub struct FileChange {
    pub path: PathBuf,
    pub original: String,
    pub transformed: String,
}

impl FileChange {
    /// Returns true if the content was modified.
    pub fn is_modified(&self) -> bool {
        self.original != self.transformed
    }

    /// Overwrites the file with the transformed content. Unmodified files are not touched.
    pub fn write(&self) -> Result<()> {
        if self.is_modified() {
            std::fs::write(&self.path, &self.transformed).map_err(|source| {
                RewriteError::WriteFile {
                    path: self.path.clone(),
                    source,
                }
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl Transform for Upper {
        fn apply(&self, source: &str, _path: &Path) -> Result<String> {
            Ok(source.to_uppercase())
        }

        fn describe(&self) -> String {
            "Uppercase everything".to_string()
        }
    }

    #[test]
    fn test_chain_applies_in_order() {
        let chain = TransformBuilder::new()
            .replace_pattern(r"old_(\w+)", "new_$1")
            .unwrap()
            .replace_literal("new_a", "done");

        let out = chain.apply("old_a old_b", Path::new("x.sol")).unwrap();
        assert_eq!(out, "done new_b");
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_custom_transform() {
        let chain = TransformBuilder::new().custom(Upper);
        let out = chain.apply("revert", Path::new("x.sol")).unwrap();
        assert_eq!(out, "REVERT");
        assert_eq!(chain.describe(), vec!["Uppercase everything".to_string()]);
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let result = TransformBuilder::new().replace_pattern("revert(", "x");
        assert!(matches!(result, Err(RewriteError::Regex(_))));
    }

    #[test]
    fn test_unmodified_change_is_not_written() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("A.sol");
        let change = FileChange {
            path,
            original: "same".to_string(),
            transformed: "same".to_string(),
        };

        // The parent directory does not exist, so a write would fail.
        assert!(change.write().is_ok());
    }

    #[test]
    fn test_failed_write_names_the_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("A.sol");
        let change = FileChange {
            path: path.clone(),
            original: "revertFoo();".to_string(),
            transformed: "revert Foo();".to_string(),
        };

        match change.write() {
            Err(RewriteError::WriteFile { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
