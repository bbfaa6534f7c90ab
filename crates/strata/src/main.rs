use std::process::ExitCode;

use anyhow::{Result, bail};
use clap::Parser;
use strata::Pipeline;
use strata::cli::{App, Commands};
use strata::logging::init_logging;
use strata_fetch::Fetcher;
use strata_fs::SnapshotStore;

fn main() -> ExitCode {
    let app = App::parse();

    if let Err(e) = init_logging(&app.log_config()) {
        eprintln!("strata: {e:#}");
        return ExitCode::FAILURE;
    }

    match run(&app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(app: &App) -> Result<()> {
    match app.command() {
        Commands::Run(arg) => {
            let fetcher = Fetcher::with_reqwest(arg.fetch_options())?;
            let store = SnapshotStore::new(&app.data_dir).with_options(arg.store_options());
            let pipeline = Pipeline::new(fetcher, store).endpoints(arg.endpoints.iter().cloned());

            for saved in pipeline.run()? {
                println!("{}: {}", saved.endpoint, saved.path.display());
            }
        }
        Commands::Latest(arg) => {
            let store = SnapshotStore::new(&app.data_dir);
            match store.latest(&arg.name)? {
                Some(path) => println!("{}", path.display()),
                None => bail!("no snapshots for {} in {}", arg.name, app.data_dir.display()),
            }
        }
    }
    Ok(())
}
