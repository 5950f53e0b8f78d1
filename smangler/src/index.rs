//! Name → files index over a [`ResourceTree`].

use std::{collections::BTreeMap, path::PathBuf};

use log::debug;

use crate::store::ResourceTree;

/// For every string name, the files that define it.
///
/// Names iterate in sorted order; the files of one name keep the order in
/// which they were met while scanning the tree (itself path-sorted). A name
/// defined twice in the same file lists that file twice.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StringIndex {
    names: BTreeMap<String, Vec<PathBuf>>,
}

impl StringIndex {
    pub fn build(tree: &ResourceTree) -> Self {
        let mut names: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();

        for (path, document) in tree.iter() {
            debug!("  indexing {}", path.display());
            for name in document.string_names() {
                names
                    .entry(name.to_string())
                    .or_default()
                    .push(path.clone());
            }
        }

        StringIndex { names }
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&[PathBuf]> {
        self.names.get(name).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.names
            .iter()
            .map(|(name, paths)| (name.as_str(), paths.as_slice()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::Path};
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_build_index_across_locales() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            "values/strings.xml",
            r#"<resources><string name="title">Title</string><string name="app_name">Foo</string></resources>"#,
        );
        write(
            temp_dir.path(),
            "values-it/strings.xml",
            r#"<resources><string name="app_name">Pippo</string><!-- note --></resources>"#,
        );

        let tree = ResourceTree::load(temp_dir.path()).unwrap();
        let index = StringIndex::build(&tree);
        let root = tree.root();

        assert_eq!(index.len(), 2);
        assert_eq!(index.names().collect::<Vec<_>>(), vec!["app_name", "title"]);
        assert_eq!(
            index.get("app_name").unwrap(),
            &[
                root.join("values/strings.xml"),
                root.join("values-it/strings.xml"),
            ]
        );
        assert_eq!(index.get("title").unwrap(), &[root.join("values/strings.xml")]);
        assert!(index.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_name_in_one_file_is_listed_twice() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            "values/strings.xml",
            r#"<resources><string name="dup">1</string><string name="dup">2</string></resources>"#,
        );

        let tree = ResourceTree::load(temp_dir.path()).unwrap();
        let index = StringIndex::build(&tree);
        let file = tree.root().join("values/strings.xml");
        assert_eq!(index.get("dup").unwrap(), &[file.clone(), file]);
    }

    #[test]
    fn test_index_does_not_decode_values() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            "values/strings.xml",
            r#"<!DOCTYPE resources [<!ENTITY app "Foo">]><resources><string name="&app;_title">&undeclared;</string></resources>"#,
        );

        let tree = ResourceTree::load(temp_dir.path()).unwrap();
        let index = StringIndex::build(&tree);
        assert_eq!(index.names().collect::<Vec<_>>(), vec!["Foo_title"]);
    }

    #[test]
    fn test_empty_tree_gives_empty_index() {
        let temp_dir = TempDir::new().unwrap();
        let tree = ResourceTree::load(temp_dir.path()).unwrap();
        let index = StringIndex::build(&tree);
        assert!(index.is_empty());
        assert_eq!(index.iter().count(), 0);
    }
}
