use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "interview-coach",
    version,
    about = "Interview answer critique service with multi-provider LLM failover"
)]
pub struct Cli {
    /// Configuration file (defaults to config/coach.toml, or built-in defaults when absent)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Override the bind address from the configuration
    #[arg(long)]
    pub addr: Option<SocketAddr>,
}
