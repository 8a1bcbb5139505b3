//! # sol-rewrite
//!
//! Tree-wide, idempotent text rewrites for Solidity sources.
//!
//! A run walks a directory, applies one or more regex substitutions to every
//! file whose name ends with a suffix, and writes back only the files whose
//! content changed.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sol_rewrite::prelude::*;
//!
//! // revertNotOwner(); -> revert NotOwner();
//! let result = Rewriter::in_dir("./contracts")
//!     .files(|f| f.suffix(".sol").exclude("lib/**"))
//!     .rule(rules::revert_spacing()?)
//!     .run_with(|change| println!("Fixed {}", change.path.display()))?;
//!
//! println!("{}", result.summary);
//! # Ok::<(), sol_rewrite::error::RewriteError>(())
//! ```
//!
//! ## Config-driven runs
//!
//! ```rust,no_run
//! use sol_rewrite::prelude::*;
//!
//! let config = RewriteConfig::load("rewrite.yaml")?;
//! let result = config.rewriter()?.run()?;
//! println!("{} file(s) modified", result.files_modified());
//! # Ok::<(), sol_rewrite::error::RewriteError>(())
//! ```

pub mod config;
pub mod diff;
pub mod error;
pub mod matcher;
pub mod rewrite;
pub mod rules;
pub mod transform;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{RewriteConfig, RuleSpec};
    pub use crate::diff::DiffSummary;
    pub use crate::error::{Result, RewriteError};
    pub use crate::matcher::FileMatcher;
    pub use crate::rewrite::{RewriteResult, Rewriter, rewrite};
    pub use crate::rules::{self, RulePreset};
    pub use crate::transform::{FileChange, TextTransform, Transform, TransformBuilder};
}

pub use prelude::*;
