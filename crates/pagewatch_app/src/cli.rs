use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "pagewatch")]
#[command(about = "Snapshot web page sections and report changes against the first capture")]
#[command(version)]
pub struct Cli {
    /// JSON page list: [{"id": .., "url": .., "xpaths": [..]}]
    #[arg(long, global = true, default_value = "pages.json")]
    pub pages: PathBuf,

    /// Directory holding one snapshot folder per page
    #[arg(long, global = true, default_value = "./store")]
    pub store: PathBuf,

    /// Where log records go; stdout is reserved for the report
    #[arg(long, global = true, value_enum, default_value_t = LogDestination::Off)]
    pub log: LogDestination,

    /// Log at debug level
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub check: CheckArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch every page and compare it with its baseline (default)
    Check(CheckArgs),

    /// List the stored snapshots of a page, oldest (the baseline) first
    History(HistoryArgs),
}

#[derive(Parser, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Only check the page with this id (repeatable)
    #[arg(long = "page")]
    pub only: Vec<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
}

#[derive(Parser, Debug)]
pub struct HistoryArgs {
    /// Page id as configured in the page list
    pub id: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogDestination {
    /// No log output
    #[value(name = "none")]
    Off,
    /// Append to ./pagewatch.log
    File,
    /// Write to stderr
    Terminal,
    /// Both file and stderr
    Both,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, LogDestination};
    use clap::Parser;

    #[test]
    fn bare_invocation_checks_all_pages() {
        let cli = Cli::try_parse_from(["pagewatch"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.check.only.is_empty());
        assert_eq!(cli.check.timeout, 30);
        assert_eq!(cli.log, LogDestination::Off);
        assert_eq!(cli.store.to_str(), Some("./store"));
    }

    #[test]
    fn page_filter_and_log_destination_parse() {
        let cli = Cli::try_parse_from([
            "pagewatch", "--page", "a", "--page", "b", "--log", "both", "-v",
        ])
        .unwrap();
        assert_eq!(cli.check.only, vec!["a", "b"]);
        assert_eq!(cli.log, LogDestination::Both);
        assert!(cli.verbose);
    }

    #[test]
    fn history_takes_a_page_id() {
        let cli = Cli::try_parse_from(["pagewatch", "history", "news", "--store", "/tmp/s"]).unwrap();
        match cli.command {
            Some(Command::History(args)) => assert_eq!(args.id, "news"),
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.store.to_str(), Some("/tmp/s"));
    }
}
