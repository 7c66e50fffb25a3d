use anyhow::Result;
use docqa_cli::{bootstrap, Session};
use docqa_core::config::Config;
use std::io;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).init();
}

async fn run() -> Result<()> {
    let config = Config::load()?;
    let settings = config.settings()?;
    info!("Corpus directory: {}", settings.corpus.resolved_dir().display());
    let ctx = bootstrap(settings).await?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let report = Session::new(&ctx).run(stdin.lock(), stdout.lock()).await?;
    info!("Session ended: {} answered, {} failed", report.answered, report.failed);
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    match runtime.block_on(run()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
