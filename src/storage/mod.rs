//! Key-value storage backends for the recipe collection.
//!
//! The whole collection lives under a single key ([`RECIPES_KEY`]). Which
//! backend holds it depends on where the program runs:
//! - native targets: [`FileStorage`], one file per key in the data directory
//! - `wasm32`: [`LocalStorage`], the browser's `window.localStorage`
//!
//! [`MemoryStorage`] is volatile and available everywhere.

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local;
mod memory;

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;
pub use memory::MemoryStorage;

/// Storage key holding the serialized recipe collection.
pub const RECIPES_KEY: &str = "@recipes";

/// Asynchronous text key-value store.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    /// Returns `Ok(None)` if the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrites any existing value at `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Returns `Ok(())` even if the key did not exist.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// The backend could not be reached.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Runtime platform, decided once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Browser,
    Device,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Platform::Browser
        } else {
            Platform::Device
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Browser => write!(f, "browser"),
            Platform::Device => write!(f, "device"),
        }
    }
}

/// Builds the persistent backend for `platform`.
///
/// `data_dir` is only used by the device backend. Asking for a platform
/// this build was not compiled for yields a volatile [`MemoryStorage`].
pub fn for_platform(platform: Platform, data_dir: PathBuf) -> Arc<dyn StorageAdapter> {
    tracing::debug!("Selecting {} storage backend", platform);
    match platform {
        #[cfg(not(target_arch = "wasm32"))]
        Platform::Device => Arc::new(FileStorage::new(data_dir)),
        #[cfg(target_arch = "wasm32")]
        Platform::Browser => {
            let _ = data_dir;
            Arc::new(LocalStorage)
        }
        other => {
            let _ = data_dir;
            tracing::warn!(
                "No {} storage backend in this build, falling back to memory",
                other
            );
            Arc::new(MemoryStorage::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_current_platform_is_device_on_native() {
        assert_eq!(Platform::current(), Platform::Device);
    }

    #[tokio::test]
    async fn test_device_backend_persists_to_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let storage = for_platform(Platform::Device, temp_dir.path().to_path_buf());

        storage.set(RECIPES_KEY, "[]").await.unwrap();

        let reopened = for_platform(Platform::Device, temp_dir.path().to_path_buf());
        assert_eq!(
            reopened.get(RECIPES_KEY).await.unwrap(),
            Some("[]".to_string())
        );
    }

    #[tokio::test]
    async fn test_browser_backend_falls_back_to_memory_on_native() {
        let temp_dir = TempDir::new().unwrap();
        let storage = for_platform(Platform::Browser, temp_dir.path().to_path_buf());

        storage.set(RECIPES_KEY, "[]").await.unwrap();

        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }
}
