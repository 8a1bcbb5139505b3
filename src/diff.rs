//! Line diffs of rewritten files.

use similar::{ChangeTag, TextDiff};
use std::fmt;
use std::path::Path;

/// Renders a unified diff (three lines of context) between two versions of a file.
pub fn unified_diff(original: &str, modified: &str, path: &Path) -> String {
    let diff = TextDiff::from_lines(original, modified);
    let mut output = format!("--- a/{0}\n+++ b/{0}\n", path.display());

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            output.push_str("...\n");
        }
        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                    ChangeTag::Equal => ' ',
                };
                output.push(sign);
                output.push_str(change.value());
                if change.missing_newline() {
                    output.push('\n');
                }
            }
        }
    }

    output
}

/// Line counts for one or more rewritten files.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiffSummary {
    pub files_changed: usize,
    pub insertions: usize,
    pub deletions: usize,
}

impl DiffSummary {
    /// Counts inserted and deleted lines between two versions of a file.
    pub fn from_diff(original: &str, modified: &str) -> Self {
        let diff = TextDiff::from_lines(original, modified);
        let mut insertions = 0;
        let mut deletions = 0;

        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => insertions += 1,
                ChangeTag::Delete => deletions += 1,
                ChangeTag::Equal => {}
            }
        }

        Self {
            files_changed: usize::from(insertions > 0 || deletions > 0),
            insertions,
            deletions,
        }
    }

    pub fn merge(&mut self, other: &DiffSummary) {
        self.files_changed += other.files_changed;
        self.insertions += other.insertions;
        self.deletions += other.deletions;
    }
}

impl fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} file(s) changed, {} insertions(+), {} deletions(-)",
            self.files_changed, self.insertions, self.deletions
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_changed_lines() {
        let summary = DiffSummary::from_diff(
            "pragma solidity =0.8.15;\ncontract A {}\n",
            "pragma solidity ^0.8.20;\ncontract A {}\n",
        );
        assert_eq!(
            summary,
            DiffSummary {
                files_changed: 1,
                insertions: 1,
                deletions: 1
            }
        );
    }

    #[test]
    fn test_identical_content_changes_nothing() {
        let summary = DiffSummary::from_diff("a\n", "a\n");
        assert_eq!(summary, DiffSummary::default());
    }

    #[test]
    fn test_merge_and_display() {
        let mut total = DiffSummary::from_diff("a\n", "b\n");
        total.merge(&DiffSummary::from_diff("c\nd\n", "c\ne\n"));
        assert_eq!(
            total.to_string(),
            "2 file(s) changed, 2 insertions(+), 2 deletions(-)"
        );
    }

    #[test]
    fn test_unified_diff() {
        let diff = unified_diff(
            "revertFoo();\n",
            "revert Foo();\n",
            Path::new("src/A.sol"),
        );
        assert!(diff.starts_with("--- a/src/A.sol\n+++ b/src/A.sol\n"));
        assert!(diff.contains("-revertFoo();\n"));
        assert!(diff.contains("+revert Foo();\n"));
    }

    #[test]
    fn test_unified_diff_without_trailing_newline() {
        let diff = unified_diff("revertFoo();", "revert Foo();", Path::new("A.sol"));
        assert!(diff.ends_with("+revert Foo();\n"));
    }
}
