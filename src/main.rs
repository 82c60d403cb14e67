use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use npm_check::check::{CheckRun, WalkLister};
use npm_check::config::{CheckConfig, log_filter};
use npm_check::version::registries::NpmRegistry;

#[derive(Parser)]
#[command(name = "npm-check")]
#[command(version, about = "Report outdated npm dependencies in a project tree")]
struct Cli {
    /// Check the latest version of a package (repeatable); skips directory scanning
    #[arg(
        short,
        long = "package",
        value_name = "NAME",
        value_parser = clap::builder::NonEmptyStringValueParser::new()
    )]
    packages: Vec<String>,

    /// Update all packages
    #[arg(short, long)]
    update: bool,

    /// Directory to scan for package.json files
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Registry base URL (overrides NPM_CHECK_REGISTRY and the config file)
    #[arg(long, value_name = "URL")]
    registry: Option<String>,

    /// Log filter, e.g. "debug" or "npm_check=trace" (defaults to NPM_CHECK_LOG, then "warn")
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn init_logging(cli: &Cli) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = log_filter(cli.log_level.clone());
    let filter = EnvFilter::try_new(&filter).context("invalid log filter")?;

    let Some(log_file) = &cli.log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("cannot open log file {}", log_file.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CheckConfig::load()?.with_registry_override(cli.registry.clone());
    let registry = NpmRegistry::new(&config.registry_url, &config.user_agent)?;
    let run = CheckRun::new(Arc::new(registry));

    let mut out = std::io::stdout().lock();
    if !cli.packages.is_empty() {
        run.check_packages(&cli.packages, &mut out).await?;
        return Ok(());
    }

    let lister = WalkLister::new(&config.skip_dirs);
    run.check_directory(&lister, &cli.root, cli.update, &mut out)
        .await?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(&cli)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}
