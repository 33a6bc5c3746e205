//! CLI argument parsing with clap.

use std::net::IpAddr;

use clap::Parser;

/// Ad generator backend: turns media and a behavior description into ad markup.
#[derive(Parser, Debug)]
#[command(name = "adgen", version, about)]
pub struct Cli {
    /// Config file path override.
    #[arg(short, long)]
    pub config: Option<String>,

    /// Address to bind (overrides the config file).
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Port to listen on (overrides the config file).
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}
