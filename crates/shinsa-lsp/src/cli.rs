use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "shinsa-lsp",
    author,
    version,
    about = "Language Server Protocol implementation for shinsa",
    long_about = "Shinsa LSP reviews Python documents as they are edited and publishes\n\
                  the findings as diagnostics.\n\n\
                  Configure logging with --log-level and --log-file options."
)]
pub struct Cli {
    #[arg(long, value_enum, default_value = "info", help = "Set the log level")]
    pub log_level: LogLevel,

    #[arg(long, help = "Write logs to the specified file")]
    pub log_file: Option<PathBuf>,

    #[arg(long, help = "Output logs in JSON format")]
    pub log_json: bool,
}
