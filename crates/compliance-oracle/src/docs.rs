//! Jurisdiction reference documents
//!
//! Flat text files under a fixed root, injected into oracle prompts. A path
//! that escapes the root, or a file that is missing, contributes an empty
//! string and a warning.

use compliance_engine::JurisdictionConfig;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct ReferenceDocs {
    root: PathBuf,
}

impl ReferenceDocs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `relative` under the root, refusing anything outside it
    pub fn resolve(&self, relative: &Path) -> Option<PathBuf> {
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            warn!(path = %relative.display(), "Refusing reference doc path outside the docs root");
            return None;
        }

        let root = match self.root.canonicalize() {
            Ok(root) => root,
            Err(e) => {
                warn!(root = %self.root.display(), error = %e, "Reference docs root is not readable");
                return None;
            }
        };

        let candidate = match root.join(relative).canonicalize() {
            Ok(path) => path,
            Err(e) => {
                warn!(path = %relative.display(), error = %e, "Reference doc not found");
                return None;
            }
        };

        // Symlinks can still point outside the root
        if !candidate.starts_with(&root) {
            warn!(path = %relative.display(), "Reference doc resolves outside the docs root");
            return None;
        }

        Some(candidate)
    }

    /// Contents of one document, or an empty string
    pub fn load(&self, relative: &Path) -> String {
        let Some(path) = self.resolve(relative) else {
            return String::new();
        };
        match fs::read_to_string(&path) {
            Ok(text) => {
                debug!(path = %path.display(), bytes = text.len(), "Loaded reference doc");
                text
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read reference doc");
                String::new()
            }
        }
    }

    /// Every document a jurisdiction lists, joined with blank lines
    pub fn load_for(&self, config: &JurisdictionConfig) -> String {
        config
            .reference_docs
            .iter()
            .map(|path| self.load(path))
            .filter(|text| !text.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
