use std::path::PathBuf;

use clap::Parser;

/// Vocalis credit and speech API
#[derive(Debug, Parser)]
#[command(name = "vocalis", about = "Credit-metered text-to-speech API with payment webhooks")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "vocalis.toml", env = "VOCALIS_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "VOCALIS_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
