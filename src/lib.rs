//! # imagecat - Read-Only Annotated Image Catalog
//!
//! `imagecat` keeps a catalog of images in memory and answers the queries an
//! image viewer needs. Every image exists in two kinds:
//!
//! - **original**: the unmodified picture
//! - **protanope**: a rendition adjusted for red-blind viewers
//!
//! and carries one annotation text per kind. Metadata comes from a CSV file
//! with a `filename` column; image files live under
//! `{images_dir}/{kind}/{filename}`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use imagecat::{ImageKind, ImageResolver, MetadataService, Resolution, Result};
//!
//! # fn main() -> Result<()> {
//! // Load once at startup
//! let service = MetadataService::new("images.csv");
//! service.load()?;
//!
//! // Page through the catalog
//! let page = service.list_page(1, 20)?;
//! for record in page.data {
//!     println!("{}", record.filename());
//! }
//!
//! // Serve a file
//! let resolver = ImageResolver::new("images");
//! let exists = service.exists("cat.png")?;
//! if let Resolution::Found(file) = resolver.resolve(ImageKind::Original, "cat.png", exists)? {
//!     println!("{} bytes of {}", file.bytes.len(), file.content_type);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Lookup semantics
//!
//! Filenames need not be unique in the source. Point lookups resolve to the
//! first record with a given filename; later duplicates are still listed by
//! [`MetadataService::list_page`].

pub mod core;

pub use crate::core::{
    catalog::Catalog,
    error::{CatalogError, Result},
    index::FilenameIndex,
    kind::{ImageKind, UnknownKind},
    loader::{load, load_from_reader},
    pagination::{paginate, total_pages, Page, PageInfo},
    query::MetadataService,
    record::{ImageRecord, Schema, SchemaError, FILENAME_COLUMN},
    resolver::{
        content_type_for, ImageFile, ImageResolver, NotFoundReason, Resolution,
        DEFAULT_CONTENT_TYPE,
    },
};
