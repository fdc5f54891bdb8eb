use ignore::WalkBuilder;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
}

/// A set of readable, non-blank source files ordered by path.
///
/// The order is part of the contract: ambiguous-symbol candidates are
/// recorded in discovery order, so every pass walks files the same way.
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    files: Vec<SourceFile>,
}

impl SourceSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Walks `root` and reads every file whose extension is in `extensions`.
    ///
    /// Unreadable, non-UTF-8 and blank files are skipped. A missing root
    /// yields an empty set.
    pub fn load<S: AsRef<str>>(root: &Path, extensions: &[S]) -> Self {
        let paths = Self::collect_paths(root, extensions);
        let files = paths
            .par_iter()
            .filter_map(|path| match fs::read_to_string(path) {
                Ok(text) => Some(SourceFile {
                    path: path.clone(),
                    text,
                }),
                Err(e) => {
                    tracing::debug!("Skipping unreadable file {}: {}", path.display(), e);
                    None
                }
            })
            .collect();
        Self::from_files(files)
    }

    /// Builds a set from in-memory sources, applying the same filtering and
    /// ordering as [`SourceSet::load`].
    pub fn from_sources<P, T>(sources: impl IntoIterator<Item = (P, T)>) -> Self
    where
        P: Into<PathBuf>,
        T: Into<String>,
    {
        Self::from_files(
            sources
                .into_iter()
                .map(|(path, text)| SourceFile {
                    path: path.into(),
                    text: text.into(),
                })
                .collect(),
        )
    }

    fn from_files(mut files: Vec<SourceFile>) -> Self {
        files.retain(|f| !f.text.trim().is_empty());
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Self { files }
    }

    fn collect_paths<S: AsRef<str>>(root: &Path, extensions: &[S]) -> Vec<PathBuf> {
        WalkBuilder::new(root)
            .hidden(false)
            .build()
            .filter_map(|entry| {
                let entry = entry.ok()?;
                let path = entry.path();
                let ext = path.extension().and_then(|e| e.to_str())?;
                if path.is_file() && extensions.iter().any(|x| x.as_ref() == ext) {
                    return Some(path.to_path_buf());
                }
                None
            })
            .collect()
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
