//! Metadata query service
//!
//! Owns the loaded [`Catalog`] and its [`FilenameIndex`] and answers the
//! read-only queries the HTTP layer needs. The catalog is loaded exactly
//! once, after which the service is shared by reference (usually behind an
//! `Arc`) and never mutated.

use crate::core::catalog::Catalog;
use crate::core::error::{CatalogError, Result};
use crate::core::index::FilenameIndex;
use crate::core::kind::ImageKind;
use crate::core::loader;
use crate::core::pagination::{paginate, Page};
use crate::core::record::ImageRecord;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info};

struct LoadedCatalog {
    catalog: Catalog,
    index: FilenameIndex,
}

impl LoadedCatalog {
    fn new(catalog: Catalog) -> Self {
        let index = FilenameIndex::build(&catalog);
        debug!(
            "Indexed {} distinct filenames across {} records",
            index.len(),
            catalog.len()
        );
        LoadedCatalog { catalog, index }
    }
}

/// Read-only access to image metadata
///
/// # Examples
///
/// ```no_run
/// use imagecat::{ImageKind, MetadataService};
///
/// # fn main() -> imagecat::Result<()> {
/// let service = MetadataService::new("images.csv");
/// service.load()?;
///
/// let page = service.list_page(1, 20)?;
/// println!("{} of {} images", page.len(), page.pagination.total);
///
/// if let Some(text) = service.get_annotation("cat.png", ImageKind::Protanope)? {
///     println!("{}", text);
/// }
/// # Ok(())
/// # }
/// ```
pub struct MetadataService {
    source: Option<PathBuf>,
    state: OnceLock<LoadedCatalog>,
}

impl MetadataService {
    /// Create an unloaded service reading from `source`
    pub fn new(source: impl Into<PathBuf>) -> Self {
        MetadataService {
            source: Some(source.into()),
            state: OnceLock::new(),
        }
    }

    /// Create a service around an already built catalog
    pub fn from_catalog(catalog: Catalog) -> Self {
        let state = OnceLock::new();
        let _ = state.set(LoadedCatalog::new(catalog));
        MetadataService {
            source: None,
            state,
        }
    }

    /// Read the source and build the index
    ///
    /// Returns the number of records loaded. Fails with `AlreadyLoaded` on a
    /// second call; the first catalog stays in place.
    pub fn load(&self) -> Result<usize> {
        if self.state.get().is_some() {
            return Err(CatalogError::AlreadyLoaded);
        }
        let source = self.source.as_deref().ok_or(CatalogError::AlreadyLoaded)?;

        info!("Loading image data from {:?}", source);
        let loaded = LoadedCatalog::new(loader::load(source)?);
        let count = loaded.catalog.len();

        self.state
            .set(loaded)
            .map_err(|_| CatalogError::AlreadyLoaded)?;
        Ok(count)
    }

    pub fn is_loaded(&self) -> bool {
        self.state.get().is_some()
    }

    /// Where the catalog is read from, if it came from a file
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    fn loaded(&self) -> Result<&LoadedCatalog> {
        self.state.get().ok_or(CatalogError::CatalogNotLoaded)
    }

    pub fn catalog(&self) -> Result<&Catalog> {
        Ok(&self.loaded()?.catalog)
    }

    /// One page of records in catalog order
    pub fn list_page(&self, page: usize, page_size: usize) -> Result<Page<'_>> {
        let loaded = self.loaded()?;
        Ok(paginate(loaded.catalog.records(), page, page_size))
    }

    /// First record whose filename is `filename`
    pub fn get_by_filename(&self, filename: &str) -> Result<Option<&ImageRecord>> {
        let loaded = self.loaded()?;
        Ok(loaded
            .index
            .lookup(filename)
            .and_then(|pos| loaded.catalog.get(pos)))
    }

    pub fn exists(&self, filename: &str) -> Result<bool> {
        Ok(self.loaded()?.index.contains(filename))
    }

    /// Annotation text of `filename` for `kind`
    pub fn get_annotation(&self, filename: &str, kind: ImageKind) -> Result<Option<&str>> {
        Ok(self
            .get_by_filename(filename)?
            .and_then(|record| record.annotation(kind)))
    }
}
