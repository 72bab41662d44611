//! Image binary resolver
//!
//! Maps a kind and a catalog filename to `{images_dir}/{kind}/{filename}`
//! and reads it. Files are read fresh on every call.

use crate::core::error::{CatalogError, Result};
use crate::core::kind::ImageKind;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Content type used when the extension is unknown
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Why an image could not be served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The catalog has no record for the filename
    Metadata,
    /// The catalog knows the filename but the file is not on disk
    Disk,
}

/// File contents ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(ImageFile),
    NotFound(NotFoundReason),
}

/// Guess a MIME type from the filename's extension
pub fn content_type_for(filename: &str) -> String {
    mime_guess::from_path(filename)
        .first_raw()
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string()
}

/// A filename is only joined onto the images root if it is a single,
/// plain path component
fn is_plain_filename(filename: &str) -> bool {
    !filename.is_empty()
        && filename != "."
        && filename != ".."
        && !filename.contains(['/', '\\', '\0'])
}

/// Resolves image files under a base directory
#[derive(Debug, Clone)]
pub struct ImageResolver {
    base_dir: PathBuf,
}

impl ImageResolver {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        ImageResolver {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Location of `filename` for `kind`, or `None` if the name would
    /// escape its kind directory
    pub fn path_for(&self, kind: ImageKind, filename: &str) -> Option<PathBuf> {
        is_plain_filename(filename).then(|| self.base_dir.join(kind.dir_name()).join(filename))
    }

    /// Read the image, given whether the catalog knows `filename`
    pub fn resolve(
        &self,
        kind: ImageKind,
        filename: &str,
        catalog_exists: bool,
    ) -> Result<Resolution> {
        if !catalog_exists {
            return Ok(Resolution::NotFound(NotFoundReason::Metadata));
        }
        let Some(path) = self.path_for(kind, filename) else {
            debug!("Refusing to resolve unsafe filename: {:?}", filename);
            return Ok(Resolution::NotFound(NotFoundReason::Disk));
        };

        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Ok(Resolution::NotFound(NotFoundReason::Disk)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(Resolution::NotFound(NotFoundReason::Disk))
            }
            Err(e) => return Err(CatalogError::Io(e)),
        }

        let read = fs::read(&path);
        finish_read(path, filename, read)
    }

    /// Same as [`resolve`](Self::resolve), without blocking the runtime
    #[cfg(feature = "async")]
    pub async fn resolve_async(
        &self,
        kind: ImageKind,
        filename: &str,
        catalog_exists: bool,
    ) -> Result<Resolution> {
        if !catalog_exists {
            return Ok(Resolution::NotFound(NotFoundReason::Metadata));
        }
        let Some(path) = self.path_for(kind, filename) else {
            debug!("Refusing to resolve unsafe filename: {:?}", filename);
            return Ok(Resolution::NotFound(NotFoundReason::Disk));
        };

        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Ok(Resolution::NotFound(NotFoundReason::Disk)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(Resolution::NotFound(NotFoundReason::Disk))
            }
            Err(e) => return Err(CatalogError::Io(e)),
        }

        let read = tokio::fs::read(&path).await;
        finish_read(path, filename, read)
    }
}

/// The file may vanish between the metadata check and the read
fn finish_read(path: PathBuf, filename: &str, read: io::Result<Vec<u8>>) -> Result<Resolution> {
    match read {
        Ok(bytes) => {
            debug!("Read {} bytes from {:?}", bytes.len(), path);
            Ok(Resolution::Found(ImageFile {
                bytes,
                content_type: content_type_for(filename),
                path,
            }))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Image removed before it could be read: {:?}", path);
            Ok(Resolution::NotFound(NotFoundReason::Disk))
        }
        Err(e) => Err(CatalogError::Io(e)),
    }
}
