//! Exact-match rewrite and redirect tables.
//!
//! The defaults mirror the site's Netlify config: clean URLs are rewritten to
//! their `.html` files and the `.html` URLs redirect permanently to the clean
//! form. A Netlify `_redirects` file can replace them.

use axum::http::StatusCode;
use std::collections::HashMap;

const CLEAN_PAGES: &[&str] = &["about", "services", "projects", "faq", "contact"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub location: String,
    pub status: StatusCode,
}

#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    rewrites: HashMap<String, String>,
    redirects: HashMap<String, Redirect>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RedirectsParseError {
    #[error("line {line}: expected `from to [status]`")]
    MissingTarget { line: usize },
    #[error("line {line}: invalid status `{status}`")]
    InvalidStatus { line: usize, status: String },
    #[error("line {line}: status {status} is not a rewrite or redirect")]
    UnsupportedStatus { line: usize, status: u16 },
}

impl RouteTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rewrites and permanent redirects for the site's pages.
    pub fn site_defaults() -> Self {
        let mut table = Self::empty();
        table.add_rewrite("/", "/index.html");
        table.add_redirect("/index.html", "/", StatusCode::MOVED_PERMANENTLY);
        for page in CLEAN_PAGES {
            let clean = format!("/{page}");
            let file = format!("/{page}.html");
            table.add_rewrite(&clean, &file);
            table.add_redirect(&file, &clean, StatusCode::MOVED_PERMANENTLY);
        }
        table
    }

    /// Parse a Netlify `_redirects` file. Status defaults to 301; a trailing
    /// `!` (forced rule) is accepted and ignored.
    pub fn from_netlify(src: &str) -> Result<Self, RedirectsParseError> {
        let mut table = Self::empty();
        for (idx, raw) in src.lines().enumerate() {
            let line = idx + 1;
            let content = raw.trim();
            if content.is_empty() || content.starts_with('#') {
                continue;
            }
            let mut fields = content.split_whitespace();
            let (Some(from), Some(to)) = (fields.next(), fields.next()) else {
                return Err(RedirectsParseError::MissingTarget { line });
            };
            let status = match fields.next() {
                None => StatusCode::MOVED_PERMANENTLY,
                Some(s) => s
                    .trim_end_matches('!')
                    .parse::<u16>()
                    .ok()
                    .and_then(|code| StatusCode::from_u16(code).ok())
                    .ok_or_else(|| RedirectsParseError::InvalidStatus {
                        line,
                        status: s.to_string(),
                    })?,
            };
            if status == StatusCode::OK {
                table.add_rewrite(from, to);
            } else if status.is_redirection() {
                table.add_redirect(from, to, status);
            } else {
                return Err(RedirectsParseError::UnsupportedStatus {
                    line,
                    status: status.as_u16(),
                });
            }
        }
        Ok(table)
    }

    pub fn add_rewrite(&mut self, from: &str, to: &str) {
        self.rewrites.insert(from.to_string(), to.to_string());
    }

    pub fn add_redirect(&mut self, from: &str, to: &str, status: StatusCode) {
        self.redirects.insert(
            from.to_string(),
            Redirect {
                location: to.to_string(),
                status,
            },
        );
    }

    #[inline]
    pub fn rewrite(&self, path: &str) -> Option<&str> {
        self.rewrites.get(path).map(String::as_str)
    }

    #[inline]
    pub fn redirect(&self, path: &str) -> Option<&Redirect> {
        self.redirects.get(path)
    }

    /// Clean URLs worth printing in the startup banner.
    pub fn rewrite_sources(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.rewrites.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}
