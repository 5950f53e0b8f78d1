//! The two operations the tool performs on resource trees.
//!
//! - [`CopyOp`] copies matching strings from a source tree into a destination
//!   tree, mirroring each `values*` directory name.
//! - [`DeleteOp`] removes matching strings from every file of a tree.
//!
//! Both load their trees, mutate the documents in memory and flush every
//! document back to disk before returning. There is no rollback: when a write
//! fails, files written before it keep their new content.

pub mod copy;
pub mod delete;

pub use copy::{CopyOp, CopyReport};
pub use delete::{DeleteOp, DeleteReport};
