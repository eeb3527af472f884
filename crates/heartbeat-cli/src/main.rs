use std::path::PathBuf;

use clap::Parser;
use heartbeat_core::{Config, Environment, Heartbeat, Layout, Progress};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "heartbeat",
    version,
    about = "Overnight check of todos, inbox, calendar and email"
)]
struct Cli {
    /// Write placeholders instead of running checks or calling any API
    #[arg(long)]
    dry_run: bool,
    /// Project root (default: nearest ancestor containing .claude/)
    #[arg(long)]
    root: Option<PathBuf>,
    /// Config file (default: <root>/.claude/heartbeat-config.json)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let layout = match cli.root {
        Some(root) => Layout::new(root),
        None => Layout::detect(&std::env::current_dir()?),
    };
    let config_path = cli.config.unwrap_or_else(|| layout.config_path());
    let config = Config::load(&config_path)?;
    let today = chrono::Local::now().date_naive();

    println!("Brain Heartbeat - {}", today.format("%Y-%m-%d"));
    println!("Checks: {}", config.checks.join(", "));
    println!("Dry run: {}", cli.dry_run);
    println!();
    tracing::debug!(
        root = %layout.root().display(),
        model = %config.overnight.model,
        monthly_limit_usd = config.budget.monthly_limit_usd,
        alert_at_percent = config.budget.alert_at_percent,
        "starting heartbeat"
    );

    let heartbeat = Heartbeat::new(layout, config, Environment::capture());
    let run = heartbeat
        .run_with_progress(today, cli.dry_run, |event| match event {
            Progress::Running(kind) => println!("Running: {kind}..."),
            Progress::Finished(_, outcome) => println!("  {}", outcome.status()),
            Progress::Unknown(name) => println!("  Unknown check: {name}, skipping."),
            Progress::Summarizing => println!("Generating AI summary..."),
        })
        .await?;
    println!("Summary: {}", run.summary.status());
    println!("\nHeartbeat written to: {}", run.path.display());
    println!("File size: {} bytes", run.bytes);
    Ok(())
}
