#![forbid(unsafe_code)]
//! Copy and prune string resources across Android resource trees.
//!
//! Works on every `strings.xml` found in a `values*` directory (`values`,
//! `values-it`, `values-en-rGB`, ...) below a resource root, at any depth.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use smangler::{CopyOp, DeleteOp, Matcher, traits::Operation};
//!
//! // Copy every string whose name starts with `app_` from one project to another
//! let report = CopyOp::new("lib/src/main/res", "app/src/main/res", Matcher::new(Some("^app_"))?)
//!     .perform()?;
//! println!("{}", report);
//!
//! // Remove the legacy strings from the library
//! DeleteOp::new("lib/src/main/res", Matcher::new(Some("^legacy_"))?)?.perform()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Building blocks
//!
//! - [`ResourceDocument`]: one `strings.xml`, written back verbatim apart from
//!   the entries that were appended or removed
//! - [`ResourceTree`]: every document under a directory, keyed by path
//! - [`StringIndex`]: string name → files defining it
//! - [`Matcher`]: optional regular expression over string names

pub mod document;
pub mod error;
pub mod index;
pub mod matcher;
pub mod ops;
pub mod store;
pub mod traits;

// Re-export most used types for easy consumption
pub use crate::{
    document::{ResourceDocument, StringEntry},
    error::Error,
    index::StringIndex,
    matcher::Matcher,
    ops::{CopyOp, CopyReport, DeleteOp, DeleteReport},
    store::ResourceTree,
};
