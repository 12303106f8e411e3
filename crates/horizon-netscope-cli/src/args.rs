//! Command-line argument definitions.

use clap::Parser;

/// Snapshot of local and wide-area network health.
#[derive(Parser, Debug)]
#[command(name = "netscope", author, version, about, long_about = None)]
pub struct Args {
    /// Show IPv6 addresses
    #[arg(short = '6', long)]
    pub ipv6: bool,

    /// Show virtual interfaces
    #[arg(short = 'x', long = "virtual")]
    pub show_virtual: bool,

    /// Ping the default gateway and show the average round-trip time
    #[arg(short, long)]
    pub ping: bool,

    /// Check internet connectivity: public IP, beacon latency, DNS servers
    #[arg(short, long)]
    pub internet: bool,
}
