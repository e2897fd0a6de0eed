//! The host capability seam for module I/O.
//!
//! The loader never touches the network or filesystem itself; everything
//! goes through a [`ModuleHost`]. The bundled [`FsHost`] serves `file:` URLs
//! from the local filesystem and nothing else.

use crate::error::LoadError;
use async_trait::async_trait;
use ps_types::Value;
use std::io;
use url::Url;

/// What the loader needs from its embedder: module text by URL, and
/// optionally pre-evaluated "native" modules that bypass parsing entirely.
#[async_trait]
pub trait ModuleHost: Send + Sync {
    /// Fetch module source text.
    async fn fetch(&self, url: &Url) -> Result<String, LoadError>;

    /// Produce a native module's default export, already evaluated.
    /// Typically a mapping of named bindings, but any value is legal; a
    /// single function is a common shape for host built-ins.
    async fn import_native(&self, url: &Url) -> Result<Value, LoadError> {
        Err(LoadError::NativeUnsupported {
            url: url.to_string(),
        })
    }

    /// Whether a URL names a native module. The default follows the `.ts` /
    /// `.js` extension convention; hosts may override.
    fn is_native(&self, url: &Url) -> bool {
        let path = url.path();
        path.ends_with(".ts") || path.ends_with(".js")
    }
}

/// A host serving `file:` URLs from the local filesystem. Has no native
/// module registry.
#[derive(Debug, Default)]
pub struct FsHost;

#[async_trait]
impl ModuleHost for FsHost {
    async fn fetch(&self, url: &Url) -> Result<String, LoadError> {
        if url.scheme() != "file" {
            return Err(LoadError::UnsupportedProtocol {
                url: url.to_string(),
                scheme: url.scheme().to_string(),
            });
        }
        let path = url.to_file_path().map_err(|()| LoadError::Io {
            url: url.to_string(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a local filesystem path"),
        })?;
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| LoadError::Io {
                url: url.to_string(),
                source,
            })
    }
}
