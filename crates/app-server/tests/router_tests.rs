use app_server::redirects::RedirectsParseError;
use app_server::routes::{normalize, NOT_FOUND_HTML};
use app_server::{app, resolve, Resolution, RouteTable, SiteState};
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tower::ServiceExt;

/// `<tmp>/site` holds the pages; `<tmp>/secret.html` sits next to it.
fn site_fixture() -> (TempDir, PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("site");
    fs::create_dir_all(root.join("blog")).unwrap();
    fs::create_dir_all(root.join("css")).unwrap();
    fs::write(root.join("index.html"), "<h1>home</h1>").unwrap();
    fs::write(root.join("about.html"), "<h1>about</h1>").unwrap();
    fs::write(root.join("blog").join("index.html"), "<h1>blog</h1>").unwrap();
    fs::write(root.join("css").join("site.CSS"), "body{}").unwrap();
    fs::write(root.join("logo.webp"), [0u8, 1, 2]).unwrap();
    fs::write(tmp.path().join("secret.html"), "secret").unwrap();
    (tmp, root)
}

async fn get(root: &Path, path: &str) -> Response {
    app(SiteState::new(root, RouteTable::site_defaults()))
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_string(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

fn content_type(resp: &Response) -> &str {
    resp.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

#[tokio::test]
async fn clean_url_is_rewritten_to_html_file() {
    let (_tmp, root) = site_fixture();
    let resp = get(&root, "/about").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(content_type(&resp), "text/html");
    assert_eq!(body_string(resp).await, "<h1>about</h1>");
}

#[tokio::test]
async fn html_url_redirects_permanently_to_clean_url() {
    let (_tmp, root) = site_fixture();
    let resp = get(&root, "/about.html").await;
    assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/about");
}

#[tokio::test]
async fn root_serves_index() {
    let (_tmp, root) = site_fixture();
    let resp = get(&root, "/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "<h1>home</h1>");

    let resp = get(&root, "/index.html").await;
    assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
}

#[tokio::test]
async fn traversal_never_leaves_site_root() {
    let (_tmp, root) = site_fixture();
    for path in ["/../secret.html", "/../../secret", "/a/../../../secret.html"] {
        let resp = get(&root, path).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{path}");
        assert_ne!(body_string(resp).await, "secret", "{path}");
    }

    let Resolution::File { path, .. } =
        resolve(&RouteTable::site_defaults(), &root, "/../../etc/passwd")
    else {
        panic!("expected a file resolution");
    };
    assert!(path.starts_with(&root));
    assert_eq!(path, root.join("etc").join("passwd.html"));
}

#[tokio::test]
async fn unmapped_missing_path_is_404() {
    let (_tmp, root) = site_fixture();
    let resp = get(&root, "/pricing").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(content_type(&resp), "text/html; charset=utf-8");
    assert_eq!(body_string(resp).await, NOT_FOUND_HTML);
}

#[tokio::test]
async fn trailing_slash_falls_back_to_directory_index() {
    let (_tmp, root) = site_fixture();
    let resp = get(&root, "/blog/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "<h1>blog</h1>");

    let resp = get(&root, "/nothing/").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn content_type_follows_lowercased_extension() {
    let (_tmp, root) = site_fixture();
    let resp = get(&root, "/css/site.CSS").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(content_type(&resp), "text/css");

    let resp = get(&root, "/logo.webp").await;
    assert_eq!(content_type(&resp), "application/octet-stream");
}

#[tokio::test]
async fn unreadable_existing_path_is_500() {
    let (_tmp, root) = site_fixture();
    // a directory that matches the resolved file name exists but can't be read as a file
    fs::create_dir_all(root.join("docs.html")).unwrap();
    let resp = get(&root, "/docs").await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_string(resp).await.starts_with("Server Error: "));
}

#[test]
fn lookups_are_exact_match_only() {
    let table = RouteTable::site_defaults();
    assert_eq!(table.rewrite("/about"), Some("/about.html"));
    assert_eq!(table.rewrite("/about/"), None);
    assert_eq!(table.rewrite("/About"), None);
    assert!(table.redirect("/about.html?x=1").is_none());
}

#[test]
fn normalize_drops_dot_segments() {
    assert_eq!(normalize("a/./b//c"), PathBuf::from("a/b/c"));
    assert_eq!(normalize("../../x"), PathBuf::from("x"));
    assert_eq!(normalize("a/b/../../../y"), PathBuf::from("y"));
    assert_eq!(normalize("..\\..\\z"), PathBuf::from("z"));
}

#[test]
fn netlify_redirects_file_fills_both_tables() {
    let src = "\
# clean urls
/team    /team.html   200
/team.html /team 301!
/old  /new
/tmp  /elsewhere 302
";
    let table = RouteTable::from_netlify(src).unwrap();
    assert_eq!(table.rewrite("/team"), Some("/team.html"));
    let r = table.redirect("/team.html").unwrap();
    assert_eq!((r.location.as_str(), r.status), ("/team", StatusCode::MOVED_PERMANENTLY));
    assert_eq!(table.redirect("/old").unwrap().status, StatusCode::MOVED_PERMANENTLY);
    assert_eq!(table.redirect("/tmp").unwrap().status, StatusCode::FOUND);
}

#[test]
fn netlify_redirects_file_rejects_bad_lines() {
    assert_eq!(
        RouteTable::from_netlify("/only-from").unwrap_err(),
        RedirectsParseError::MissingTarget { line: 1 }
    );
    assert_eq!(
        RouteTable::from_netlify("\n/a /b abc").unwrap_err(),
        RedirectsParseError::InvalidStatus {
            line: 2,
            status: "abc".into()
        }
    );
    assert_eq!(
        RouteTable::from_netlify("/a /b 404").unwrap_err(),
        RedirectsParseError::UnsupportedStatus { line: 1, status: 404 }
    );
}
