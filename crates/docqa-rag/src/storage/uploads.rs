//! Upload directory for raw uploaded files

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::Result;

/// Local directory holding uploaded files as `<document_id>_<filename>`
#[derive(Debug, Clone)]
pub struct UploadDirectory {
    root: PathBuf,
}

impl UploadDirectory {
    /// Create the directory if needed
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path an upload is stored under
    pub fn path_for(&self, id: &Uuid, filename: &str) -> PathBuf {
        self.root.join(format!("{}_{}", id, sanitize_filename(filename)))
    }

    /// Write an upload, returning its path
    pub async fn save(&self, id: &Uuid, filename: &str, data: &[u8]) -> Result<PathBuf> {
        let path = self.path_for(id, filename);
        tokio::fs::write(&path, data).await?;
        tracing::debug!("Saved upload to {}", path.display());
        Ok(path)
    }

    /// Delete a stored upload. Failures are logged, not returned.
    pub async fn remove(&self, path: &Path) {
        if let Err(e) = tokio::fs::remove_file(path).await {
            tracing::warn!("Failed to remove upload {}: {}", path.display(), e);
        }
    }
}

/// Keep only the final path component and replace separators
fn sanitize_filename(filename: &str) -> String {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();

    let cleaned: String = name
        .chars()
        .map(|c| if c.is_control() || c == ':' { '_' } else { c })
        .collect();

    match cleaned.as_str() {
        "" | "." | ".." => "upload".to_string(),
        _ => cleaned,
    }
}
