//! Request handlers
//!
//! Each handler validates its inputs, calls into the catalog and returns a
//! response or an [`ApiError`]. Turning errors into bodies and adding CORS
//! headers is left to the router.

use crate::config::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::error::{ApiError, ApiResult};
use crate::response::{self, Body, IMAGE_CACHE_CONTROL};
use hyper::header::{self, HeaderValue};
use hyper::{Response, StatusCode};
use imagecat::{content_type_for, ImageKind, ImageResolver, MetadataService, NotFoundReason, Resolution};
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Shared, read-only state handed to every request
pub struct AppState {
    pub service: MetadataService,
    pub resolver: ImageResolver,
    pub static_dir: PathBuf,
}

/// Validated `page` / `page_size` query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    pub page: usize,
    pub page_size: usize,
}

impl ListParams {
    /// Parse and range-check the listing query string
    pub fn from_query(query: Option<&str>) -> ApiResult<Self> {
        let mut page = None;
        let mut page_size = None;
        for (key, value) in form_urlencoded::parse(query.unwrap_or("").as_bytes()) {
            match key.as_ref() {
                "page" => page = Some(value.into_owned()),
                "page_size" => page_size = Some(value.into_owned()),
                _ => {}
            }
        }

        let page = parse_int("page", page.as_deref(), 1)?;
        let page_size = parse_int("page_size", page_size.as_deref(), DEFAULT_PAGE_SIZE as i64)?;

        if page < 1 {
            return Err(ApiError::BadRequest("Page must be >= 1".to_string()));
        }
        if page_size < 1 || page_size > MAX_PAGE_SIZE as i64 {
            return Err(ApiError::BadRequest(format!(
                "Page size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        Ok(ListParams {
            page: usize::try_from(page).map_err(|_| invalid_int("page", page))?,
            page_size: page_size as usize,
        })
    }
}

fn invalid_int(name: &str, raw: impl std::fmt::Display) -> ApiError {
    ApiError::BadRequest(format!("Invalid {}: {}", name, raw))
}

fn parse_int(name: &str, raw: Option<&str>, default: i64) -> ApiResult<i64> {
    match raw {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| invalid_int(name, raw)),
    }
}

fn parse_kind(raw: &str) -> ApiResult<ImageKind> {
    raw.parse::<ImageKind>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// `GET /api/images`
pub fn list_images(state: &AppState, query: Option<&str>) -> ApiResult<Response<Body>> {
    let params = ListParams::from_query(query).map_err(|e| {
        warn!("Invalid parameter: {}", e);
        e
    })?;

    let page = state.service.list_page(params.page, params.page_size)?;
    let resp = response::json(StatusCode::OK, &page)?;
    info!(
        "Returned page {} with {} images",
        page.pagination.page,
        page.len()
    );
    Ok(resp)
}

/// `GET /api/images/{kind}/{filename}`
pub fn image_detail(state: &AppState, kind: &str, filename: &str) -> ApiResult<Response<Body>> {
    let kind = parse_kind(kind).map_err(|e| {
        warn!("{}", e);
        e
    })?;

    let Some(record) = state.service.get_by_filename(filename)? else {
        warn!("Image not found: {}", filename);
        return Err(ApiError::NotFound(format!("Image not found: {}", filename)));
    };

    let resp = response::json(StatusCode::OK, record)?;
    info!("Returned details for {}/{}", kind, filename);
    Ok(resp)
}

/// `GET /images/{kind}/{filename}`
pub async fn image_file(state: &AppState, kind: &str, filename: &str) -> ApiResult<Response<Body>> {
    let kind = kind.parse::<ImageKind>().map_err(|_| {
        warn!("Invalid imagetype: {}", kind);
        ApiError::BadRequest(format!(
            "Invalid imagetype. Must be one of: {}",
            ImageKind::expected()
        ))
    })?;

    let exists = state.service.exists(filename)?;
    match state.resolver.resolve_async(kind, filename, exists).await? {
        Resolution::Found(file) => {
            let mut resp = response::file(&file.content_type, file.bytes);
            resp.headers_mut().insert(
                header::CACHE_CONTROL,
                HeaderValue::from_static(IMAGE_CACHE_CONTROL),
            );
            info!("Served image: {}/{}", kind, filename);
            Ok(resp)
        }
        Resolution::NotFound(NotFoundReason::Metadata) => {
            warn!("Image not found in database: {}", filename);
            Err(ApiError::NotFound("Image not found".to_string()))
        }
        Resolution::NotFound(NotFoundReason::Disk) => {
            error!(
                "Image file not found on disk: {:?}",
                state.resolver.base_dir().join(kind.dir_name()).join(filename)
            );
            Err(ApiError::NotFound("Image file not found on disk".to_string()))
        }
    }
}

/// `GET /`
pub fn index() -> Response<Body> {
    response::redirect("/static/index.html")
}

/// Join request segments onto `root`, refusing anything but plain names
fn static_path(root: &Path, segments: &[String]) -> Option<PathBuf> {
    if segments.is_empty() || segments.iter().any(|s| s.is_empty()) {
        return None;
    }
    let relative: PathBuf = segments.iter().collect();
    let plain = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    (plain && relative.components().count() == segments.len()).then(|| root.join(relative))
}

/// `GET /static/{path}`
pub async fn static_file(state: &AppState, segments: &[String]) -> ApiResult<Response<Body>> {
    // Directory listings are not served
    if segments.last().map_or(true, |s| s.is_empty()) {
        return Err(ApiError::NotFound("Not found".to_string()));
    }
    let Some(path) = static_path(&state.static_dir, segments) else {
        warn!("Rejected static path: {:?}", segments);
        return Err(ApiError::BadRequest("Invalid path".to_string()));
    };

    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Err(ApiError::NotFound("Not found".to_string())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Static file not found: {:?}", path);
            return Err(ApiError::NotFound("Not found".to_string()));
        }
        Err(e) => return Err(ApiError::Internal(format!("{:?}: {}", path, e))),
    }

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| ApiError::Internal(format!("{:?}: {}", path, e)))?;
    let name = segments.last().map(String::as_str).unwrap_or_default();
    Ok(response::file(&content_type_for(name), bytes))
}
