//! Uploaded file handling and the pre-parse gate

use log::debug;
use std::path::Path;

use super::error::ImportFailure;

pub const ALLOWED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 10;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Limits enforced before a file is parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportLimits {
    pub max_file_size_mb: u64,
}

impl Default for ImportLimits {
    fn default() -> Self {
        Self {
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
        }
    }
}

impl ImportLimits {
    pub fn new(max_file_size_mb: u64) -> Self {
        Self { max_file_size_mb }
    }
}

/// A spreadsheet file whose bytes are fully loaded
#[derive(Debug, Clone)]
pub struct ImportFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ImportFile {
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a file from disk. Only the read is asynchronous; validation of
    /// the loaded bytes runs synchronously afterwards.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ImportFailure> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|source| ImportFailure::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        debug!("Loaded {} ({} bytes)", name, bytes.len());
        Ok(Self { name, bytes })
    }

    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }

    pub fn size_mb(&self) -> f64 {
        self.bytes.len() as f64 / BYTES_PER_MB
    }
}

/// Reject files by extension, then by size. Runs before any parsing.
pub fn check_file(file: &ImportFile, limits: &ImportLimits) -> Result<(), ImportFailure> {
    let allowed = file
        .extension()
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false);
    if !allowed {
        return Err(ImportFailure::FileType {
            file_name: file.name.clone(),
            allowed: ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| format!(".{}", ext))
                .collect::<Vec<_>>()
                .join(" or "),
        });
    }

    let size_mb = file.size_mb();
    if size_mb > limits.max_file_size_mb as f64 {
        return Err(ImportFailure::FileSize {
            file_name: file.name.clone(),
            size_mb,
            limit_mb: limits.max_file_size_mb,
        });
    }

    Ok(())
}
