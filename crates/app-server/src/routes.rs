//! Request path → response: redirect, rewrite, then a file under the site root.

use crate::mime::content_type_for;
use crate::redirects::RouteTable;
use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const NOT_FOUND_HTML: &str = "<h1>404 - File Not Found</h1>";

pub struct SiteState {
    pub root: PathBuf,
    pub routes: RouteTable,
}

impl SiteState {
    pub fn new(root: impl Into<PathBuf>, routes: RouteTable) -> Self {
        Self {
            root: root.into(),
            routes,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Redirect {
        location: String,
        status: StatusCode,
    },
    File {
        path: PathBuf,
        /// Directory index tried when `path` is missing and the request ended in `/`.
        index_fallback: Option<PathBuf>,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("not found")]
    NotFound,
    #[error("read failed: {0}")]
    Read(#[from] std::io::Error),
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        match self {
            ServeError::NotFound => (StatusCode::NOT_FOUND, Html(NOT_FOUND_HTML)).into_response(),
            ServeError::Read(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Server Error: {}", e.kind()),
            )
                .into_response(),
        }
    }
}

/// Work out what a request path maps to. Exact-match tables only; the
/// resulting file path always stays under `root`.
pub fn resolve(routes: &RouteTable, root: &Path, request_path: &str) -> Resolution {
    if let Some(r) = routes.redirect(request_path) {
        return Resolution::Redirect {
            location: r.location.clone(),
            status: r.status,
        };
    }

    let pathname = routes.rewrite(request_path).unwrap_or(request_path);
    let file = if pathname == "/" { "/index.html" } else { pathname };
    let mut rel = file.strip_prefix('/').unwrap_or(file).to_string();
    if Path::new(&rel).extension().is_none() {
        rel.push_str(".html");
    }

    let index_fallback = pathname.ends_with('/').then(|| {
        root.join(normalize(pathname.trim_start_matches('/')))
            .join("index.html")
    });

    Resolution::File {
        path: root.join(normalize(&rel)),
        index_fallback,
    }
}

/// Collapse `.` and `..` segments without ever climbing above the start.
/// Both `/` and `\` separate segments.
pub fn normalize(rel: &str) -> PathBuf {
    let mut parts: Vec<&str> = Vec::new();
    for seg in rel.split(['/', '\\']) {
        match seg {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            s => parts.push(s),
        }
    }
    parts.iter().collect()
}

pub async fn serve(State(site): State<Arc<SiteState>>, uri: Uri) -> Response {
    let request_path = uri.path();
    match resolve(&site.routes, &site.root, request_path) {
        Resolution::Redirect { location, status } => {
            log::debug!("{request_path} -> {status} {location}");
            (status, [(header::LOCATION, location)]).into_response()
        }
        Resolution::File {
            path,
            index_fallback,
        } => {
            let result = match serve_file(&path).await {
                Err(ServeError::NotFound) => match index_fallback {
                    Some(index) => serve_file(&index).await,
                    None => Err(ServeError::NotFound),
                },
                other => other,
            };
            if let Err(e) = &result {
                log::debug!("{request_path} -> {e}");
            }
            result.into_response()
        }
    }
}

async fn serve_file(path: &Path) -> Result<Response, ServeError> {
    // existence check first so a missing file is a 404 and only a failed
    // read of something that exists is a 500
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(ServeError::NotFound);
    }
    let body = tokio::fs::read(path).await?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type_for(path))],
        body,
    )
        .into_response())
}
