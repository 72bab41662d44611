//! HTTP API for the imagecat catalog
//!
//! Serves the catalog to the browser-based viewer:
//!
//! - **`GET /api/images?page=&page_size=`** → paginated metadata as JSON
//! - **`GET /api/images/{kind}/{filename}`** → one record as JSON
//! - **`GET /images/{kind}/{filename}`** → the image file itself
//! - **`GET /static/...`** → viewer assets, with `/` redirecting there
//!
//! ## Example
//!
//! ```no_run
//! use imagecat::{ImageResolver, MetadataService};
//! use imagecat_server::{AppState, Router};
//!
//! # fn main() -> imagecat::Result<()> {
//! let service = MetadataService::new("images.csv");
//! service.load()?;
//!
//! let router = Router::new(AppState {
//!     service,
//!     resolver: ImageResolver::new("images"),
//!     static_dir: "static".into(),
//! });
//! // Hand `router` to a hyper service (see src/bin/server.rs)
//! # let _ = router;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod handlers;
mod response;
mod router;

pub use config::{ServerConfig, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use error::{ApiError, ApiResult};
pub use handlers::{AppState, ListParams};
pub use response::{Body, IMAGE_CACHE_CONTROL};
pub use router::Router;
