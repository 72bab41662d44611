//! Request routing
//!
//! | Path                              | Methods      | Errors as  |
//! |-----------------------------------|--------------|------------|
//! | `/`                               | GET          | JSON       |
//! | `/api/images`                     | GET, OPTIONS | JSON, CORS |
//! | `/api/images/{kind}/{filename}`   | GET, OPTIONS | JSON, CORS |
//! | `/images/{kind}/{filename}`       | GET          | text       |
//! | `/static/{path..}`                | GET          | text       |

use crate::error::{ApiError, ApiResult};
use crate::handlers::{self, AppState};
use crate::response::{self, Body};
use hyper::{Method, Request, Response, StatusCode};
use percent_encoding::percent_decode_str;
use std::sync::Arc;
use tracing::{debug, error};

enum Route {
    Index,
    ListImages,
    ImageDetail { kind: String, filename: String },
    ImageFile { kind: String, filename: String },
    Static(Vec<String>),
}

impl Route {
    fn is_api(&self) -> bool {
        matches!(self, Route::ListImages | Route::ImageDetail { .. })
    }
}

/// File routes answer errors in plain text, decided before any decoding
fn is_text_path(path: &str) -> bool {
    matches!(path.split('/').nth(1), Some("images" | "static"))
}

fn decode(segment: &str) -> ApiResult<String> {
    percent_decode_str(segment)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|_| ApiError::BadRequest("Invalid path encoding".to_string()))
}

fn match_route(path: &str) -> ApiResult<Option<Route>> {
    let segments: Vec<&str> = path.split('/').skip(1).collect();
    let route = match segments.as_slice() {
        [""] => Route::Index,
        ["api", "images"] => Route::ListImages,
        ["api", "images", kind, filename] if !kind.is_empty() && !filename.is_empty() => {
            Route::ImageDetail {
                kind: decode(kind)?,
                filename: decode(filename)?,
            }
        }
        ["images", kind, filename] if !kind.is_empty() && !filename.is_empty() => {
            Route::ImageFile {
                kind: decode(kind)?,
                filename: decode(filename)?,
            }
        }
        ["static", rest @ ..] => Route::Static(
            rest.iter()
                .map(|s| decode(s))
                .collect::<ApiResult<Vec<_>>>()?,
        ),
        _ => return Ok(None),
    };
    Ok(Some(route))
}

/// Dispatches requests to handlers over shared [`AppState`]
#[derive(Clone)]
pub struct Router {
    state: Arc<AppState>,
}

impl Router {
    pub fn new(state: AppState) -> Self {
        Router {
            state: Arc::new(state),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Answer one request; never fails
    pub async fn handle<B>(&self, req: Request<B>) -> Response<Body> {
        let method = req.method().clone();
        let uri = req.uri().clone();
        debug!("{} {}", method, uri);

        let is_text = is_text_path(uri.path());
        let route = match match_route(uri.path()) {
            Ok(Some(route)) => route,
            Ok(None) => {
                return response::json_error(&ApiError::NotFound("Not found".to_string()))
            }
            Err(e) => {
                debug!("Rejected path {}: {}", uri.path(), e);
                return if is_text {
                    response::text_error(&e)
                } else {
                    let mut resp = response::json_error(&e);
                    response::apply_cors(&mut resp);
                    resp
                };
            }
        };

        let is_api = route.is_api();

        let result = match (method, route) {
            (Method::OPTIONS, r) if r.is_api() => Ok(response::empty(StatusCode::NO_CONTENT)),
            (Method::GET, Route::Index) => Ok(handlers::index()),
            (Method::GET, Route::ListImages) => handlers::list_images(&self.state, uri.query()),
            (Method::GET, Route::ImageDetail { kind, filename }) => {
                handlers::image_detail(&self.state, &kind, &filename)
            }
            (Method::GET, Route::ImageFile { kind, filename }) => {
                handlers::image_file(&self.state, &kind, &filename).await
            }
            (Method::GET, Route::Static(segments)) => {
                handlers::static_file(&self.state, &segments).await
            }
            _ => Err(ApiError::MethodNotAllowed),
        };

        let mut resp = match result {
            Ok(resp) => resp,
            Err(err) => {
                if let ApiError::Internal(detail) = &err {
                    error!("Error handling {} {}: {}", req.method(), uri, detail);
                }
                if is_text {
                    response::text_error(&err)
                } else {
                    response::json_error(&err)
                }
            }
        };

        if is_api {
            response::apply_cors(&mut resp);
        }
        resp
    }
}
