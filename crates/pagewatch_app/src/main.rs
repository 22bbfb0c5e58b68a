mod cli;
mod logging;
mod pages;
mod report;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use engine_logging::engine_info;
use pagewatch_core::Page;
use pagewatch_engine::{FetchSettings, PageRunner, ReqwestFetcher, SnapshotStore};

use crate::cli::{CheckArgs, Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log, cli.verbose);

    let pages = pages::load_pages(&cli.pages)?;
    let store = SnapshotStore::new(&cli.store);

    match &cli.command {
        Some(Command::History(args)) => {
            if !pages.iter().any(|page| page.id == args.id) {
                bail!("no page with id {:?} in the page list", args.id);
            }
            report::write_history(&mut io::stdout().lock(), &store, &args.id)?;
        }
        Some(Command::Check(args)) => check(pages, store, args)?,
        None => check(pages, store, &cli.check)?,
    }
    Ok(())
}

/// Per-page failures are part of the report, not the exit status.
fn check(pages: Vec<Page>, store: SnapshotStore, args: &CheckArgs) -> Result<()> {
    let pages = pages::select_pages(pages, &args.only)?;
    let settings = FetchSettings {
        request_timeout: Duration::from_secs(args.timeout),
        ..FetchSettings::default()
    };
    let runner = PageRunner::new(Arc::new(ReqwestFetcher::new(settings)), store);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("cannot start async runtime")?;

    engine_info!(
        "checking {} pages into {}",
        pages.len(),
        runner.store().root().display()
    );
    let results = runtime.block_on(runner.run_all(&pages));
    report::write_results(&mut io::stdout().lock(), &results)?;
    Ok(())
}
