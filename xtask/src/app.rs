use anyhow::Result;

pub fn build(cli: crate::cli::BuildCli) -> Result<()> {
    crate::logging::init(&cli.common.log);
    crate::tasks::build::run(cli)
}

pub fn package(cli: crate::cli::PackageCli) -> Result<()> {
    crate::logging::init(&cli.common.log);
    crate::tasks::package::run(cli)
}
