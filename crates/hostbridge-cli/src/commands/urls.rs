//! `bridge asset-url` and `bridge proxy-url`.

use anyhow::Result;
use clap::Args;

use hostbridge_core::capability::fs::container_entry_path;
use hostbridge_core::urls::{resolve_asset_url, resolve_proxy_url};

use crate::profile;

#[derive(Args, Debug)]
pub struct AssetUrlArgs {
    /// Host path of the file, or of the archive with --entry
    pub path: String,

    /// Archive kind when the file lives inside an archive, e.g. `zip`
    #[arg(long)]
    pub container: Option<String>,

    /// Entry inside the archive
    #[arg(long, requires = "container")]
    pub entry: Option<String>,

    /// Print the same-origin path instead of a full URL
    #[arg(long)]
    pub relative: bool,
}

#[derive(Args, Debug)]
pub struct ProxyUrlArgs {
    /// External URL to route through the host
    pub url: String,

    /// Print the same-origin path instead of a full URL
    #[arg(long)]
    pub relative: bool,
}

pub fn asset_url(args: AssetUrlArgs, host: Option<&str>) -> Result<()> {
    let path = match &args.entry {
        Some(entry) => container_entry_path(&args.path, entry),
        None => args.path.clone(),
    };

    let url = resolve_asset_url(&path, args.container.as_deref());
    print_url(&url, args.relative, host)
}

pub fn proxy_url(args: ProxyUrlArgs, host: Option<&str>) -> Result<()> {
    let url = resolve_proxy_url(&args.url);
    print_url(&url, args.relative, host)
}

fn print_url(url: &str, relative: bool, host: Option<&str>) -> Result<()> {
    if relative {
        println!("{}", url);
    } else {
        let (host, _) = profile::resolve_host(host)?;
        println!("{}", host.join(url));
    }

    Ok(())
}
