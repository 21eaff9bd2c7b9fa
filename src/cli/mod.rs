use clap::Parser;
use std::path::PathBuf;

pub mod ui;

#[derive(Parser)]
#[command(
    name = "coderefine",
    about = "HTTP engine that reviews, scores and translates source code with an LLM",
    version,
    author,
    long_about = None
)]
pub struct CodeRefineCli {
    /// Sets the log level (error, warn, info, debug, trace)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Path to a YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to bind, overrides the config file
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind, overrides the config file
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Upstream request timeout in seconds, overrides the config file
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}
