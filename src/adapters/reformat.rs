//! External XML pretty-printer collaborator
//!
//! Reformatting is best-effort cosmetic post-processing: the export worker
//! invokes it after a successful EAD write and logs a warning on failure
//! without touching the item's outcome.

use crate::domain::{AspexError, Result};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

/// Reformat a just-written export file in place
#[async_trait]
pub trait Reformatter: Send + Sync {
    /// Rewrite the file at `path` with formatted content
    async fn reformat_in_place(&self, path: &Path) -> Result<()>;
}

/// Reformatter backed by `xmllint --format`
///
/// Requires `xmllint` on the PATH. The formatted output replaces the
/// original file only when xmllint exits cleanly.
pub struct XmllintReformatter;

#[async_trait]
impl Reformatter for XmllintReformatter {
    async fn reformat_in_place(&self, path: &Path) -> Result<()> {
        let output = Command::new("xmllint")
            .arg("--format")
            .arg(path)
            .output()
            .await
            .map_err(|e| AspexError::Reformat(format!("could not run xmllint: {e}")))?;

        if !output.status.success() {
            return Err(AspexError::Reformat(format!(
                "xmllint failed for {}: {}",
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        tokio::fs::write(path, &output.stdout)
            .await
            .map_err(|e| {
                AspexError::Reformat(format!(
                    "could not rewrite formatted output to {}: {e}",
                    path.display()
                ))
            })?;

        Ok(())
    }
}
