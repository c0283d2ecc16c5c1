use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = xtask::cli::PackageCli::parse();
    xtask::app::package(cli)
}
