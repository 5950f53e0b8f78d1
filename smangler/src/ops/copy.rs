use std::{
    fmt::Display,
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};

use crate::{
    error::Error,
    index::StringIndex,
    matcher::Matcher,
    store::{ResourceTree, STRINGS_FILE_NAME},
    traits::Operation,
};

/// Copies the strings whose names match a filter from one resource directory
/// into another.
///
/// Each string is copied from every source file that defines it into
/// `<destination>/<source file's directory name>/strings.xml`, so `values-it`
/// entries land in `values-it`. Missing directories and files are created.
/// Copying only ever appends: existing destination entries, including ones
/// with the same name, are kept, and running the same copy twice adds the
/// entries twice.
#[derive(Debug, Clone)]
pub struct CopyOp {
    source: PathBuf,
    destination: PathBuf,
    matcher: Matcher,
}

/// What a [`CopyOp`] run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// `strings.xml` files loaded from the source directory.
    pub source_files: usize,
    /// `strings.xml` files loaded from the destination directory.
    pub destination_files: usize,
    /// Destination files that did not exist before the run.
    pub files_created: usize,
    /// Distinct string names in the source directory.
    pub names_found: usize,
    /// Distinct names accepted by the filter.
    pub names_copied: usize,
    /// `<string>` elements appended across all destination files.
    pub entries_appended: usize,
    /// Destination files written back to disk.
    pub files_written: usize,
}

impl Display for CopyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} of {} string name(s) copied ({} entries) into {} file(s), {} new",
            self.names_copied,
            self.names_found,
            self.entries_appended,
            self.files_written,
            self.files_created
        )
    }
}

impl CopyOp {
    pub fn new<S, D>(source: S, destination: D, matcher: Matcher) -> Self
    where
        S: Into<PathBuf>,
        D: Into<PathBuf>,
    {
        CopyOp {
            source: source.into(),
            destination: destination.into(),
            matcher,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }
}

impl Operation for CopyOp {
    type Report = CopyReport;

    fn perform(&self) -> Result<CopyReport, Error> {
        let source_root = self.source.canonicalize()?;
        let destination_root = self.destination.canonicalize()?;
        if source_root == destination_root {
            return Err(Error::SameDirectory(source_root));
        }

        info!("Loading strings.xml files in source dir...");
        let source = ResourceTree::load(&source_root)?;
        info!("{} strings file(s) read from source dir", source.len());

        info!("Loading strings.xml files in destination dir...");
        let mut destination = ResourceTree::load(&destination_root)?;
        info!(
            "{} strings file(s) read from destination dir",
            destination.len()
        );

        info!("Enumerating strings in source dir...");
        let index = StringIndex::build(&source);
        info!("{} string name(s) found in source dir", index.len());

        let mut report = CopyReport {
            source_files: source.len(),
            destination_files: destination.len(),
            names_found: index.len(),
            ..CopyReport::default()
        };

        info!("Copying strings matching {} to destination dir...", self.matcher);
        for (name, files) in index.iter() {
            if !self.matcher.matches(name) {
                continue;
            }
            debug!("Copying string \"{}\"", name);
            report.names_copied += 1;
            for file in files {
                if copy_string(name, file, &source, &mut destination)? {
                    report.entries_appended += 1;
                }
            }
        }
        info!(
            "{} string name(s) copied, {} entries appended",
            report.names_copied, report.entries_appended
        );

        report.files_created = destination.len() - report.destination_files;

        info!("Saving destination strings files...");
        report.files_written = destination.flush()?;

        Ok(report)
    }
}

/// Appends `name`, as defined in `source_file`, to the matching destination
/// file. Returns `false` when nothing was appended.
fn copy_string(
    name: &str,
    source_file: &Path,
    source: &ResourceTree,
    destination: &mut ResourceTree,
) -> Result<bool, Error> {
    let Some(directory) = source_file.parent().and_then(Path::file_name) else {
        warn!(
            "Unable to get the directory for file \"{}\", skipping it",
            source_file.display()
        );
        return Ok(false);
    };
    debug!(
        "  > from directory \"{}\"",
        directory.to_string_lossy()
    );

    // Re-read from the source document instead of trusting the index, so a
    // name defined twice in one file copies its first value twice.
    let Some(document) = source.get(source_file) else {
        return Ok(false);
    };
    let Some(entry) = document.find(name)? else {
        return Ok(false);
    };

    let destination_dir = destination.root().join(directory);
    fs::create_dir_all(&destination_dir)?;
    destination
        .get_or_create(destination_dir.join(STRINGS_FILE_NAME))
        .append_string(name, &entry.value);
    Ok(true)
}
