mod cli;

use clap::{CommandFactory, Parser};
use cli::Cli;
use gist_downloader::{GistClient, app, wait_for_signal};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            eprint!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cli.verbose);

    let Some(url) = cli.url.as_deref() else {
        eprintln!("Error: user URL is required");
        eprintln!();
        eprintln!("{}", Cli::command().render_usage());
        return ExitCode::FAILURE;
    };

    tokio::select! {
        result = run(&cli, url) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::debug!(error_code = e.error_code(), "Run failed");
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        },
        _ = wait_for_signal() => {
            eprintln!("Interrupted");
            ExitCode::from(130)
        }
    }
}

async fn run(cli: &Cli, url: &str) -> gist_downloader::Result<()> {
    let config = cli.to_config()?;
    config.validate()?;

    let source = GistClient::new(&config.listing)?;
    let cloner = app::build_cloner(&config.download)?;

    app::run(&config, url, &source, cloner, Box::new(std::io::stdout())).await?;
    Ok(())
}

/// Log to stderr; RUST_LOG overrides the level picked by --verbose
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
