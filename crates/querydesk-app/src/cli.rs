use std::path::PathBuf;

use clap::Parser;

/// querydesk: ask questions of a CSV dataset through a query service.
#[derive(Parser, Debug)]
#[command(name = "querydesk", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Query service base URL, overriding config and environment.
    #[arg(long)]
    pub server: Option<String>,

    /// Log filter directive (e.g. `querydesk=debug`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_empty() {
        let args = Args::try_parse_from(["querydesk"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.server.is_none());
        assert!(!args.print_config);
    }

    #[test]
    fn all_flags_parse() {
        let args = Args::try_parse_from([
            "querydesk",
            "--config",
            "/tmp/q.toml",
            "--server",
            "http://10.0.0.2:8001",
            "--log-level",
            "querydesk=debug",
            "--print-config",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/q.toml")));
        assert_eq!(args.server.as_deref(), Some("http://10.0.0.2:8001"));
        assert_eq!(args.log_level.as_deref(), Some("querydesk=debug"));
        assert!(args.print_config);
    }
}
