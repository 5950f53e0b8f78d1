use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use log::{debug, info};

use crate::{error::Error, matcher::Matcher, store::ResourceTree, traits::Operation};

/// Removes the strings whose names match a filter from every `strings.xml`
/// under a resource directory.
///
/// Every loaded file is written back, including files where nothing matched.
#[derive(Debug, Clone)]
pub struct DeleteOp {
    root: PathBuf,
    matcher: Matcher,
}

/// What a [`DeleteOp`] run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteReport {
    /// `strings.xml` files loaded.
    pub files: usize,
    /// `<string>` elements removed across all files.
    pub entries_removed: usize,
    /// Files written back to disk.
    pub files_written: usize,
}

impl Display for DeleteReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} string(s) removed from {} file(s)",
            self.entries_removed, self.files
        )
    }
}

impl DeleteOp {
    /// Fails with [`Error::MissingPattern`] when `matcher` matches every name:
    /// wiping all strings is not a supported delete.
    pub fn new<P: Into<PathBuf>>(root: P, matcher: Matcher) -> Result<Self, Error> {
        if matcher.matches_all() {
            return Err(Error::MissingPattern);
        }
        Ok(DeleteOp {
            root: root.into(),
            matcher,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }
}

impl Operation for DeleteOp {
    type Report = DeleteReport;

    fn perform(&self) -> Result<DeleteReport, Error> {
        info!("Loading strings.xml files in work dir...");
        let mut tree = ResourceTree::load(&self.root)?;
        info!("{} strings file(s) read from work dir", tree.len());

        let mut report = DeleteReport {
            files: tree.len(),
            ..DeleteReport::default()
        };

        info!("Removing strings matching {} in work dir...", self.matcher);
        for (path, document) in tree.iter_mut() {
            let removed = document.remove_strings_matching(|name| {
                let hit = self.matcher.matches(name);
                if hit {
                    debug!("  > removing string \"{}\"", name);
                }
                hit
            });
            debug!("{} string(s) removed from {}", removed, path.display());
            report.entries_removed += removed;
        }
        info!("{}", report);

        info!("Saving strings files...");
        report.files_written = tree.flush()?;

        Ok(report)
    }
}
