use anyhow::Context;
use app_server::config::Cli;
use app_server::{app, SiteState};
use clap::Parser;
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let routes = cli.route_table()?;
    let root = cli
        .root
        .canonicalize()
        .with_context(|| format!("site root {}", cli.root.display()))?;
    let clean_urls: Vec<String> = routes
        .rewrite_sources()
        .into_iter()
        .map(str::to_string)
        .collect();

    let addr = SocketAddr::new(cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    log::info!("serving {} at http://localhost:{}", root.display(), cli.port);
    for url in &clean_urls {
        log::info!("  http://localhost:{}{}", cli.port, url);
    }

    axum::serve(listener, app(SiteState::new(root, routes))).await?;
    Ok(())
}
