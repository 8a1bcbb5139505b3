//! File selection: which files under a root a rewrite visits.

use crate::error::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Predicates for selecting files under a traversal root.
#[derive(Debug, Default, Clone)]
pub struct FileMatcher {
    suffix: String,
    exclude_globs: Vec<String>,
}

impl FileMatcher {
    /// Creates a matcher that accepts every regular file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts only files whose name ends with `suffix` (e.g. `.sol`). Case-sensitive.
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Excludes files whose root-relative path matches the glob pattern.
    ///
    /// A directory matching the pattern is pruned: nothing below it is walked.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_globs.push(pattern.into());
        self
    }

    /// Excludes files matching any of the glob patterns.
    pub fn excludes(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude_globs
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn suffix_filter(&self) -> &str {
        &self.suffix
    }

    /// Returns true if the file name ends with the configured suffix.
    pub fn matches_name(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| name.as_encoded_bytes().ends_with(self.suffix.as_bytes()))
    }

    /// Starts a lazy, depth-first walk of `root` yielding matching files in file-name order.
    ///
    /// A root that does not exist, or is not a directory, yields nothing. A root
    /// whose existence cannot be checked is an error; later walk errors are
    /// yielded as `Err` items.
    pub fn walk(&self, root: &Path) -> Result<FileWalk> {
        let exclude = if self.exclude_globs.is_empty() {
            None
        } else {
            let mut builder = GlobSetBuilder::new();
            for pattern in &self.exclude_globs {
                builder.add(Glob::new(pattern)?);
            }
            Some(builder.build()?)
        };

        let filter = WalkFilter {
            root: root.to_path_buf(),
            matcher: self.clone(),
            exclude,
        };

        let entries = if !root.try_exists()? {
            debug!(root = %root.display(), "root does not exist, nothing to walk");
            None
        } else if !root.is_dir() {
            debug!(root = %root.display(), "root is not a directory, nothing to walk");
            None
        } else {
            let pruner = filter.clone();
            let walk = WalkDir::new(root)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(move |entry| !pruner.prunes(entry));
            Some(Box::new(walk) as Box<dyn Iterator<Item = walkdir::Result<DirEntry>>>)
        };

        Ok(FileWalk { entries, filter })
    }

    /// Collects all matching files under `root`.
    pub fn collect(&self, root: &Path) -> Result<Vec<PathBuf>> {
        self.walk(root)?.collect()
    }
}

#[derive(Clone)]
struct WalkFilter {
    root: PathBuf,
    matcher: FileMatcher,
    exclude: Option<GlobSet>,
}

impl WalkFilter {
    fn accepts(&self, path: &Path) -> bool {
        if !self.matcher.matches_name(path) {
            return false;
        }
        if let Some(exclude) = &self.exclude {
            let rel_path = path.strip_prefix(&self.root).unwrap_or(path);
            if exclude.is_match(rel_path) {
                debug!(path = %path.display(), "excluded");
                return false;
            }
        }
        true
    }

    fn prunes(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        let Some(exclude) = &self.exclude else {
            return false;
        };
        let rel_path = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());
        let pruned = exclude.is_match(rel_path);
        if pruned {
            debug!(path = %entry.path().display(), "excluded directory");
        }
        pruned
    }
}

/// Lazy iterator over the files selected by a [`FileMatcher`].
pub struct FileWalk {
    entries: Option<Box<dyn Iterator<Item = walkdir::Result<DirEntry>>>>,
    filter: WalkFilter,
}

impl Iterator for FileWalk {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        let entries = self.entries.as_mut()?;
        loop {
            let entry = match entries.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(err.into())),
            };
            let path = entry.path();
            if !path.is_file() || !self.filter.accepts(path) {
                continue;
            }
            return Some(Ok(path.to_path_buf()));
        }
    }
}
