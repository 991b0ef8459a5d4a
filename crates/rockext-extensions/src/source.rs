//! Read-only view of the project directory
//!
//! Extensions that need to look at the project (a required manifest, the
//! files to ship) go through [`ProjectSource`] instead of touching the
//! filesystem directly, so the processor can run against an in-memory listing.

use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeSet;
use std::io;

/// Entries never treated as project source files
pub const DEFAULT_IGNORES: &[&str] = &[".git", "node_modules", ".yarn"];

/// Suffix of packed artifacts, which are never project source files
pub const ARTIFACT_SUFFIX: &str = ".rock";

/// Read-only directory listing capability for the project root
pub trait ProjectSource {
    /// Project root directory
    fn root(&self) -> &Utf8Path;

    /// Whether `relative` exists below the project root
    fn exists(&self, relative: &str) -> bool;

    /// Names of the entries directly inside the project root, sorted
    fn list_entries(&self) -> io::Result<Vec<String>>;
}

/// Project entries that should be shipped, minus ignored names and artifacts
pub fn source_files(project: &dyn ProjectSource) -> io::Result<Vec<String>> {
    Ok(project
        .list_entries()?
        .into_iter()
        .filter(|name| !DEFAULT_IGNORES.contains(&name.as_str()))
        .filter(|name| !name.ends_with(ARTIFACT_SUFFIX))
        .collect())
}

/// Project source backed by a directory on disk
#[derive(Debug, Clone)]
pub struct FsProjectSource {
    root: Utf8PathBuf,
}

impl FsProjectSource {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ProjectSource for FsProjectSource {
    fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn exists(&self, relative: &str) -> bool {
        self.root.join(relative).exists()
    }

    fn list_entries(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in self.root.read_dir_utf8()? {
            names.push(entry?.file_name().to_string());
        }
        names.sort();
        Ok(names)
    }
}

/// Project source backed by a fixed listing
#[derive(Debug, Clone)]
pub struct InMemoryProjectSource {
    root: Utf8PathBuf,
    entries: BTreeSet<String>,
}

impl InMemoryProjectSource {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root: Utf8PathBuf::from("."),
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// An empty project
    pub fn empty() -> Self {
        Self::new(Vec::<String>::new())
    }

    pub fn with_root(mut self, root: impl Into<Utf8PathBuf>) -> Self {
        self.root = root.into();
        self
    }
}

impl ProjectSource for InMemoryProjectSource {
    fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn exists(&self, relative: &str) -> bool {
        self.entries.contains(relative)
    }

    fn list_entries(&self) -> io::Result<Vec<String>> {
        Ok(self.entries.iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_source_files_filters_ignored_and_artifacts() {
        let project = InMemoryProjectSource::new([
            "app.py",
            ".git",
            "node_modules",
            ".yarn",
            "hello_0.1_amd64.rock",
            "requirements.txt",
            "static",
        ]);
        let files = source_files(&project).unwrap();
        assert_eq!(files, vec!["app.py", "requirements.txt", "static"]);
    }

    #[test]
    fn test_in_memory_exists() {
        let project = InMemoryProjectSource::new(["requirements.txt"]).with_root("/srv/project");
        assert!(project.exists("requirements.txt"));
        assert!(!project.exists("app.py"));
        assert_eq!(project.root(), Utf8Path::new("/srv/project"));
    }

    #[test]
    fn test_fs_source_lists_sorted_entries() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("requirements.txt"), "flask\n").unwrap();
        fs::write(temp.path().join("app.py"), "").unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();

        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("Invalid UTF-8 path");
        let project = FsProjectSource::new(root);

        assert!(project.exists("requirements.txt"));
        assert!(!project.exists("missing.txt"));
        assert_eq!(
            project.list_entries().unwrap(),
            vec![".git", "app.py", "requirements.txt"]
        );
        assert_eq!(
            source_files(&project).unwrap(),
            vec!["app.py", "requirements.txt"]
        );
    }

    #[test]
    fn test_fs_source_missing_root_errors() {
        let project = FsProjectSource::new("/definitely/not/a/real/project/root");
        assert!(project.list_entries().is_err());
    }
}
