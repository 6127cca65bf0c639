//! File store for uploaded overlay textures and set covers.
//!
//! Files are addressed by slash-separated keys such as
//! `textures/grain.png`. The only backend is [`LocalFileStore`], rooted at
//! `STORAGE_ROOT`.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncRead;

/// Longest accepted key.
pub const MAX_KEY_LENGTH: usize = 512;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid file key: {0}")]
    InvalidKey(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// An opened file ready to be streamed to a client.
pub struct StoredFile {
    pub len: u64,
    pub reader: Box<dyn AsyncRead + Send + Unpin>,
}

#[async_trait]
pub trait FileStore: Send + Sync {
    /// Write `data` under `key`, replacing any existing file.
    async fn put(&self, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Open the file under `key`. `Ok(None)` when it does not exist.
    async fn open(&self, key: &str) -> Result<Option<StoredFile>, StorageError>;
}

/// Reject keys that could escape the store root or are otherwise malformed.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() || key.len() > MAX_KEY_LENGTH {
        return Err(StorageError::InvalidKey(format!(
            "key must be 1..={MAX_KEY_LENGTH} bytes"
        )));
    }
    if key.starts_with('/') || key.contains('\\') || key.contains('\0') {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    if key
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Guess a Content-Type from a key's extension.
pub fn content_type_for_key(key: &str) -> &'static str {
    let ext = key.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "css" => "text/css",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}

/// Filesystem-backed store.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn put(&self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, data).await?;
        tracing::debug!(key, bytes = data.len(), "Stored file");
        Ok(())
    }

    async fn open(&self, key: &str) -> Result<Option<StoredFile>, StorageError> {
        let path = self.resolve(key)?;
        let file = match tokio::fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            return Ok(None);
        }
        Ok(Some(StoredFile {
            len: metadata.len(),
            reader: Box::new(file),
        }))
    }
}
