use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = xtask::cli::BuildCli::parse();
    xtask::app::build(cli)
}
