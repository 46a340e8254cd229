use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use spendview_core::AnalysisOptions;

/// File name of the chart inside the static directory.
pub const CHART_FILE_NAME: &str = "chart.svg";

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding the monthly CSV statements
    #[arg(long, default_value = "transactions")]
    pub transactions_dir: PathBuf,

    /// Directory served under /static; the chart is written here
    #[arg(long, default_value = "static")]
    pub static_dir: PathBuf,

    /// Directory with the page templates (defaults to the bundled ones)
    #[arg(long)]
    pub templates_dir: Option<PathBuf>,

    /// Address to bind
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = 5000)]
    pub port: u16,
}

/// Settings fixed at process start and shared by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub transactions_dir: PathBuf,
    pub static_dir: PathBuf,
    pub templates_dir: Option<PathBuf>,
    pub addr: SocketAddr,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            transactions_dir: args.transactions_dir,
            static_dir: args.static_dir,
            templates_dir: args.templates_dir,
            addr: SocketAddr::new(args.host, args.port),
        }
    }
}

impl ServerConfig {
    /// Where the category chart is written.
    pub fn chart_path(&self) -> PathBuf {
        self.static_dir.join(CHART_FILE_NAME)
    }

    /// Analysis options for a report request.
    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions::builder()
            .chart_path(self.chart_path())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from(Args::parse_from(["spendview-web"]));
        assert_eq!(config.transactions_dir, PathBuf::from("transactions"));
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.templates_dir, None);
        assert_eq!(config.addr, "127.0.0.1:5000".parse().unwrap());
        assert_eq!(config.chart_path(), PathBuf::from("static/chart.svg"));
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from(Args::parse_from([
            "spendview-web",
            "--transactions-dir",
            "/data/statements",
            "--static-dir",
            "/srv/static",
            "--host",
            "0.0.0.0",
            "-p",
            "8080",
        ]));
        assert_eq!(config.transactions_dir, PathBuf::from("/data/statements"));
        assert_eq!(config.addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(
            config.analysis_options().chart_path,
            PathBuf::from("/srv/static/chart.svg")
        );
    }
}
