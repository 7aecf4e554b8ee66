use clap::Parser;

/// Run a Prometheus exporter for the position of the ISS.
#[derive(Debug, Default, Parser)]
#[command(version, about)]
pub struct Args {
    /// Port to run the Prometheus exporter on (default: 9280)
    #[arg(long)]
    pub port: Option<u16>,

    /// Interval in seconds between data fetches (default: 10)
    #[arg(long)]
    pub interval: Option<u32>,
}
