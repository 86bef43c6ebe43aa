use std::net::SocketAddr;

use clap::Parser;

/// Sync-tree HTTP adapter.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Address to listen on.
    #[clap(short, long, default_value = "127.0.0.1:3000")]
    pub listen: SocketAddr,

    /// Enable verbose logging (can be specified multiple times).
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn tracing_filter(&self) -> String {
        match self.verbose {
            0 => "treesync_server=info,tower_http=info".to_owned(),
            1 => "treesync_server=debug,tower_http=debug".to_owned(),
            _ => "trace".to_owned(),
        }
    }
}
