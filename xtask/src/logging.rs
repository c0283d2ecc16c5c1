use clap::{Args, ValueEnum};
use log::LevelFilter;

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Show every command line before it runs.
    #[arg(short, long)]
    pub verbose: bool,

    /// Only report errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Set the log level explicitly.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

impl LogArgs {
    /// `None` leaves the level to `RUST_LOG`.
    pub fn level(&self) -> Option<LevelFilter> {
        if self.quiet {
            return Some(LevelFilter::Error);
        }
        if self.verbose {
            return Some(LevelFilter::Debug);
        }
        self.log_level.map(|level| match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        })
    }
}

pub fn init(args: &LogArgs) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = args.level() {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).format_target(false);
    // A second init (tests, embedding) keeps the first logger.
    let _ = builder.try_init();
}
