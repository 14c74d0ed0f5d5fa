use crate::redirects::RouteTable;
use anyhow::Context;
use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Parser, Debug, Clone)]
#[command(name = "app-server", version, about = "Serve the site locally with clean URLs")]
pub struct Cli {
    /// Port to listen on
    #[arg(long, short, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Site root directory
    #[arg(long, short, default_value = ".")]
    pub root: PathBuf,

    /// Netlify `_redirects` file replacing the built-in tables
    #[arg(long)]
    pub redirects: Option<PathBuf>,
}

impl Cli {
    pub fn route_table(&self) -> anyhow::Result<RouteTable> {
        match &self.redirects {
            Some(path) => {
                let src = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                RouteTable::from_netlify(&src)
                    .with_context(|| format!("parsing {}", path.display()))
            }
            None => Ok(RouteTable::site_defaults()),
        }
    }
}
