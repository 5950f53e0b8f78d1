//! Loading and flushing every `values*/strings.xml` file under a directory.
//!
//! A [`ResourceTree`] owns the parsed documents of one resource directory,
//! keyed by absolute path. Keys are kept sorted so loading, copying and
//! writing always visit files in the same order.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use log::info;
use walkdir::WalkDir;

use crate::{document::ResourceDocument, error::Error, traits::Parser};

/// File name of an Android string resource file.
pub const STRINGS_FILE_NAME: &str = "strings.xml";

/// Prefix of the resource directories that hold string files
/// (`values`, `values-it`, `values-en-rGB`, ...).
pub const VALUES_DIR_PREFIX: &str = "values";

/// The parsed string resource files of one resource directory.
#[derive(Debug)]
pub struct ResourceTree {
    root: PathBuf,
    documents: BTreeMap<PathBuf, ResourceDocument>,
}

impl ResourceTree {
    /// Loads every eligible `strings.xml` found at any depth under `root`.
    ///
    /// A file is eligible only when its immediate parent directory name starts
    /// with `values`. Any unreadable or malformed file aborts the load.
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self, Error> {
        let root = root.as_ref().canonicalize()?;
        if !root.is_dir() {
            return Err(Error::NotADirectory(root));
        }

        let mut documents = BTreeMap::new();
        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || !is_strings_file(path) {
                continue;
            }

            info!("  loading {}", path.display());
            let document = ResourceDocument::read_from(path)?;
            documents.insert(path.to_path_buf(), document);
        }

        Ok(ResourceTree { root, documents })
    }

    /// Canonical path of the directory this tree was loaded from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, path: &Path) -> Option<&ResourceDocument> {
        self.documents.get(path)
    }

    /// Returns the document at `path`, registering an empty one first if
    /// nothing was loaded there.
    pub fn get_or_create(&mut self, path: PathBuf) -> &mut ResourceDocument {
        self.documents
            .entry(path)
            .or_insert_with(ResourceDocument::empty)
    }

    /// Documents in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &ResourceDocument)> {
        self.documents.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&PathBuf, &mut ResourceDocument)> {
        self.documents.iter_mut()
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.documents.keys()
    }

    /// Writes every document back to its path in path order, replacing the
    /// previous content, and returns how many files were written.
    ///
    /// Stops at the first failure; files written before it keep their new
    /// content.
    pub fn flush(&self) -> Result<usize, Error> {
        for (path, document) in &self.documents {
            info!("  saving {}", path.display());
            document.write_to(path)?;
        }
        Ok(self.documents.len())
    }
}

/// `true` for `.../values*/strings.xml`.
pub fn is_strings_file(path: &Path) -> bool {
    let is_named_strings = path
        .file_name()
        .is_some_and(|name| name == STRINGS_FILE_NAME);

    let in_values_dir = path
        .parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(VALUES_DIR_PREFIX));

    is_named_strings && in_values_dir
}
