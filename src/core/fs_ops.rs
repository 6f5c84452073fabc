// src/core/fs_ops.rs
//! File system operations for generated documents

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

pub struct FsOps;

impl FsOps {
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            debug!("Created directory: {}", path.display());
        }
        Ok(())
    }

    /// Per-request document path, so concurrent generations never share a file
    pub fn unique_output_path(output_dir: &Path) -> PathBuf {
        output_dir.join(format!("resume_{}.docx", uuid::Uuid::new_v4().simple()))
    }

    pub async fn read_file_bytes(path: &Path) -> Result<Vec<u8>> {
        fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Read a generated file, then delete it; a failed delete is only logged
    pub async fn take_file(path: &Path) -> Result<Vec<u8>> {
        let data = Self::read_file_bytes(path).await?;
        if let Err(e) = fs::remove_file(path).await {
            warn!("Failed to remove {}: {}", path.display(), e);
        }
        Ok(data)
    }

    pub async fn remove_file_if_exists(path: &Path) -> Result<()> {
        if path.exists() {
            fs::remove_file(path)
                .await
                .with_context(|| format!("Failed to remove file: {}", path.display()))?;
        }
        Ok(())
    }

    /// Download name derived from the person's name, `resume.docx` when blank
    pub fn download_filename(full_name: &str) -> String {
        let stem = full_name
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect::<String>()
            .split('_')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("_");

        if stem.is_empty() {
            "resume.docx".to_string()
        } else {
            format!("{}_resume.docx", stem)
        }
    }
}
