use app_server::config::{Cli, DEFAULT_PORT};
use app_server::mime::content_type_for;
use clap::Parser;
use std::path::Path;

#[test]
fn defaults_match_local_dev_setup() {
    let cli = Cli::try_parse_from(["app-server"]).unwrap();
    assert_eq!(cli.port, DEFAULT_PORT);
    assert_eq!(cli.port, 3000);
    assert!(cli.host.is_loopback());
    assert_eq!(cli.root, Path::new("."));
    assert!(cli.redirects.is_none());

    let table = cli.route_table().unwrap();
    assert_eq!(
        table.rewrite_sources(),
        vec!["/", "/about", "/contact", "/faq", "/projects", "/services"]
    );
}

#[test]
fn flags_override_defaults() {
    let cli = Cli::try_parse_from([
        "app-server", "-p", "8080", "--host", "0.0.0.0", "-r", "public",
    ])
    .unwrap();
    assert_eq!(cli.port, 8080);
    assert!(cli.host.is_unspecified());
    assert_eq!(cli.root, Path::new("public"));
}

#[test]
fn bad_port_is_rejected() {
    assert!(Cli::try_parse_from(["app-server", "--port", "70000"]).is_err());
}

#[test]
fn redirects_file_replaces_builtin_tables() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("_redirects");
    std::fs::write(&path, "/team /team.html 200\n").unwrap();
    let cli = Cli::try_parse_from(["app-server", "--redirects", path.to_str().unwrap()]).unwrap();
    let table = cli.route_table().unwrap();
    assert_eq!(table.rewrite("/team"), Some("/team.html"));
    assert_eq!(table.rewrite("/about"), None);
}

#[test]
fn unreadable_or_invalid_redirects_file_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("nope");
    let cli = Cli::try_parse_from(["app-server", "--redirects", missing.to_str().unwrap()]).unwrap();
    assert!(cli.route_table().is_err());

    let bad = tmp.path().join("_redirects");
    std::fs::write(&bad, "/a /b 418\n").unwrap();
    let cli = Cli::try_parse_from(["app-server", "--redirects", bad.to_str().unwrap()]).unwrap();
    let err = format!("{:#}", cli.route_table().unwrap_err());
    assert!(err.contains("parsing"), "{err}");
}

#[test]
fn content_types() {
    assert_eq!(content_type_for(Path::new("index.html")), "text/html");
    assert_eq!(content_type_for(Path::new("app.JS")), "text/javascript");
    assert_eq!(content_type_for(Path::new("pkg/app_web_bg.wasm")), "application/wasm");
    assert_eq!(content_type_for(Path::new("photo.jpg")), "image/jpg");
    assert_eq!(content_type_for(Path::new("README")), "application/octet-stream");
}
