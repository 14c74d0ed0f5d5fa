//! Local development server for the site: static files plus Netlify-style
//! rewrites and redirects, so clean URLs behave the same as in production.

pub mod config;
pub mod mime;
pub mod redirects;
pub mod routes;

use axum::Router;
use std::sync::Arc;

pub use redirects::{Redirect, RouteTable};
pub use routes::{resolve, Resolution, SiteState};

/// Every path goes through the same resolver, so the whole app is a fallback.
pub fn app(state: SiteState) -> Router {
    Router::new()
        .fallback(routes::serve)
        .with_state(Arc::new(state))
}
