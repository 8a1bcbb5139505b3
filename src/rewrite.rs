//! The tree rewriter: walk, transform, write back what changed.

use crate::diff::{DiffSummary, unified_diff};
use crate::error::{Result, RewriteError};
use crate::matcher::FileMatcher;
use crate::transform::{FileChange, TextTransform, TransformBuilder};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span};

/// Outcome of a rewrite run.
#[derive(Debug, Default)]
pub struct RewriteResult {
    /// Files that were rewritten, in walk order.
    pub changes: Vec<FileChange>,
    pub summary: DiffSummary,
    /// Number of files that passed the matcher and were read.
    pub files_scanned: usize,
}

impl RewriteResult {
    pub fn files_modified(&self) -> usize {
        self.changes.len()
    }

    pub fn modified_paths(&self) -> Vec<PathBuf> {
        self.changes.iter().map(|c| c.path.clone()).collect()
    }

    /// Unified diff of every rewritten file.
    pub fn diff(&self) -> String {
        self.changes
            .iter()
            .map(|c| unified_diff(&c.original, &c.transformed, &c.path))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Rewrites every matching file under a root directory.
///
/// ```rust,no_run
/// use sol_rewrite::prelude::*;
///
/// let result = Rewriter::in_dir("contracts")
///     .files(|f| f.suffix(".sol"))
///     .transform(TransformBuilder::new().text(rules::revert_spacing()?))
///     .run_with(|change| println!("Fixed {}", change.path.display()))?;
///
/// println!("{}", result.summary);
/// # Ok::<(), sol_rewrite::error::RewriteError>(())
/// ```
pub struct Rewriter {
    root: PathBuf,
    matcher: FileMatcher,
    transform: TransformBuilder,
}

impl Rewriter {
    pub fn in_dir(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            matcher: FileMatcher::new(),
            transform: TransformBuilder::new(),
        }
    }

    /// Sets the file selection predicates.
    pub fn files<F>(mut self, f: F) -> Self
    where
        F: FnOnce(FileMatcher) -> FileMatcher,
    {
        self.matcher = f(self.matcher);
        self
    }

    /// Sets the transform chain applied to each file.
    pub fn transform(mut self, transform: TransformBuilder) -> Self {
        self.transform = transform;
        self
    }

    /// Appends a single rule to the transform chain.
    pub fn rule(mut self, rule: TextTransform) -> Self {
        self.transform = self.transform.text(rule);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn run(self) -> Result<RewriteResult> {
        self.run_with(|_| {})
    }

    /// Runs the rewrite, calling `on_change` right after each modified file is written.
    ///
    /// The first read, write or walk error aborts the run. Files written before
    /// the error keep their new content.
    pub fn run_with<F>(self, mut on_change: F) -> Result<RewriteResult>
    where
        F: FnMut(&FileChange),
    {
        let _span = info_span!(
            "rewrite",
            root = %self.root.display(),
            suffix = self.matcher.suffix_filter()
        )
        .entered();

        for description in self.transform.describe() {
            debug!(rule = %description, "rule");
        }

        let mut result = RewriteResult::default();

        for path in self.matcher.walk(&self.root)? {
            let path = path?;
            result.files_scanned += 1;

            let original =
                fs::read_to_string(&path).map_err(|source| RewriteError::ReadFile {
                    path: path.clone(),
                    source,
                })?;
            let transformed = self.transform.apply(&original, &path)?;

            if transformed == original {
                debug!(path = %path.display(), "no match");
                continue;
            }

            let change = FileChange {
                path,
                original,
                transformed,
            };
            change.write()?;
            info!(path = %change.path.display(), "rewrote file");

            result
                .summary
                .merge(&DiffSummary::from_diff(&change.original, &change.transformed));
            on_change(&change);
            result.changes.push(change);
        }

        info!(
            scanned = result.files_scanned,
            modified = result.files_modified(),
            "rewrite finished"
        );
        Ok(result)
    }
}

/// Applies one regex substitution to every file under `root` whose name ends
/// with `extension`, returning the paths that were rewritten.
pub fn rewrite(
    root: impl AsRef<Path>,
    extension: &str,
    pattern: &Regex,
    replacement: &str,
) -> Result<Vec<PathBuf>> {
    let result = Rewriter::in_dir(root.as_ref())
        .files(|f| f.suffix(extension))
        .rule(TextTransform::replace_regex(pattern.clone(), replacement))
        .run()?;
    Ok(result.modified_paths())
}
