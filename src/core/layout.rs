//! Export directory tree
//!
//! One subtree per repository slug under the work directory:
//!
//! ```text
//! <workDir>/<slug>/exports/      clean exports
//! <workDir>/<slug>/invalid/      records that failed validation
//! <workDir>/<slug>/unpublished/  unpublished records, when enabled
//! ```
//!
//! All ensure operations are idempotent so re-running an export overwrites
//! prior output files of the same computed name.

use crate::domain::{AspexError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Output subdirectory a record lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputCategory {
    /// Clean exports
    Exports,

    /// Records that failed schema validation
    Invalid,

    /// Unpublished records exported in unpublished mode
    Unpublished,
}

impl OutputCategory {
    /// Directory name for this category
    pub fn dir_name(&self) -> &'static str {
        match self {
            OutputCategory::Exports => "exports",
            OutputCategory::Invalid => "invalid",
            OutputCategory::Unpublished => "unpublished",
        }
    }
}

/// The on-disk layout of one export run
#[derive(Debug, Clone)]
pub struct ExportLayout {
    work_dir: PathBuf,
}

impl ExportLayout {
    /// Create a layout rooted at `work_dir`
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    /// Root of the export tree
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Ensure the work directory exists
    pub fn ensure_work_dir(&self) -> Result<()> {
        if self.work_dir.exists() {
            tracing::info!(directory = %self.work_dir.display(), "work directory exists, skipping creation");
            return Ok(());
        }

        fs::create_dir_all(&self.work_dir).map_err(|e| {
            AspexError::Io(format!(
                "could not create work directory {}: {e}",
                self.work_dir.display()
            ))
        })
    }

    /// Ensure the per-repository subdirectories exist
    ///
    /// The `unpublished` directory is only created when unpublished export
    /// is enabled for the run.
    pub fn ensure_repository_dirs<'a>(
        &self,
        slugs: impl IntoIterator<Item = &'a str>,
        include_unpublished: bool,
    ) -> Result<()> {
        for slug in slugs {
            let repository_dir = self.work_dir.join(slug);

            let mut categories = vec![OutputCategory::Exports, OutputCategory::Invalid];
            if include_unpublished {
                categories.push(OutputCategory::Unpublished);
            }

            for category in categories {
                let dir = repository_dir.join(category.dir_name());
                if dir.exists() {
                    continue;
                }
                fs::create_dir_all(&dir).map_err(|e| {
                    AspexError::Io(format!(
                        "could not create export directory {}: {e}",
                        dir.display()
                    ))
                })?;
                tracing::info!(directory = %dir.display(), "created export directory");
            }
        }

        Ok(())
    }

    /// Resolve the output path for one record
    pub fn resource_path(&self, slug: &str, category: OutputCategory, filename: &str) -> PathBuf {
        self.work_dir
            .join(slug)
            .join(category.dir_name())
            .join(filename)
    }

    /// Remove empty subdirectories left over after a run
    ///
    /// A repository that yielded nothing under `invalid/` (or at all) leaves
    /// empty directories behind; pruning them keeps the tree scannable. The
    /// work directory itself is never removed.
    pub fn remove_empty_dirs(&self) -> Result<()> {
        prune_empty_children(&self.work_dir)?;
        Ok(())
    }
}

/// Depth-first prune of empty directories under `dir`; returns whether `dir`
/// is empty after pruning.
fn prune_empty_children(dir: &Path) -> Result<bool> {
    let mut remaining = 0usize;

    for entry in fs::read_dir(dir)
        .map_err(|e| AspexError::Io(format!("could not read directory {}: {e}", dir.display())))?
    {
        let entry = entry
            .map_err(|e| AspexError::Io(format!("could not read entry in {}: {e}", dir.display())))?;
        let path = entry.path();

        if path.is_dir() && prune_empty_children(&path)? {
            fs::remove_dir(&path).map_err(|e| {
                AspexError::Io(format!(
                    "could not remove empty directory {}: {e}",
                    path.display()
                ))
            })?;
            tracing::info!(directory = %path.display(), "removed empty directory");
        } else {
            remaining += 1;
        }
    }

    Ok(remaining == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_work_dir_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let layout = ExportLayout::new(temp.path().join("aspace-exports"));

        layout.ensure_work_dir().unwrap();
        assert!(layout.work_dir().is_dir());

        // second ensure is a no-op
        layout.ensure_work_dir().unwrap();
    }

    #[test]
    fn test_ensure_repository_dirs() {
        let temp = TempDir::new().unwrap();
        let layout = ExportLayout::new(temp.path());

        layout.ensure_repository_dirs(["tamwag"], false).unwrap();
        assert!(temp.path().join("tamwag/exports").is_dir());
        assert!(temp.path().join("tamwag/invalid").is_dir());
        assert!(!temp.path().join("tamwag/unpublished").exists());

        layout.ensure_repository_dirs(["tamwag"], true).unwrap();
        assert!(temp.path().join("tamwag/unpublished").is_dir());
    }

    #[test]
    fn test_resource_path() {
        let layout = ExportLayout::new("/work");
        let path = layout.resource_path("fales", OutputCategory::Invalid, "mc_100.xml");
        assert_eq!(path, PathBuf::from("/work/fales/invalid/mc_100.xml"));
    }

    #[test]
    fn test_remove_empty_dirs_prunes_recursively() {
        let temp = TempDir::new().unwrap();
        let layout = ExportLayout::new(temp.path());
        layout.ensure_repository_dirs(["tamwag", "fales"], true).unwrap();

        // one file keeps its directory chain alive
        fs::write(temp.path().join("tamwag/exports/mc_1.xml"), b"<ead/>").unwrap();

        layout.remove_empty_dirs().unwrap();

        assert!(temp.path().join("tamwag/exports/mc_1.xml").exists());
        assert!(!temp.path().join("tamwag/invalid").exists());
        assert!(!temp.path().join("fales").exists());
        assert!(temp.path().exists());
    }
}
