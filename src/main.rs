use anyhow::Context;
use clap::Parser;
use flatsync::config::{prompt_target, Cli};
use flatsync::logfile::SyncLog;
use flatsync::ui::Reporter;
use flatsync::{Config, Scheduler, SyncError};
use std::io;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let startup_reporter = Reporter::new(SyncLog::new(cli.log_file.clone()));
    let dry_run = cli.dry_run;

    // Startup failures are reported and end the process before the loop is
    // entered. A dry run keeps them off the log like everything else.
    let config = match load_config(cli) {
        Ok(config) => config,
        Err(e) if dry_run => {
            startup_reporter.error_console(&e.to_string());
            std::process::exit(1);
        }
        Err(e) => {
            startup_reporter.error(&e.to_string());
            std::process::exit(1);
        }
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    runtime.block_on(run(config))
}

fn load_config(cli: Cli) -> Result<Config, SyncError> {
    let config = if cli.has_target() {
        Config::try_from(cli)?
    } else {
        let stdin = io::stdin();
        let target = prompt_target(&mut stdin.lock(), &mut io::stdout())?;
        Config::from_prompt(target, &cli)?
    };

    let (config, created_replica) = config.prepare()?;
    if created_replica {
        println!("Created replica folder: {}", config.replica.display());
    }
    Ok(config)
}

async fn run(config: Config) -> anyhow::Result<()> {
    let scheduler = Scheduler::new(config);
    let reporter = scheduler.reporter().clone();
    let config = scheduler.config();

    println!("flatsync v{}", flatsync::VERSION);
    let banner = format!(
        "Starting synchronization: {} → {} (every {} s, log retention {} days)",
        config.source.display(),
        config.replica.display(),
        config.interval_secs,
        config.retention_days
    );
    // A dry run leaves the log untouched.
    if config.dry_run {
        reporter.notice(&banner);
    } else {
        reporter.info(&banner);
    }

    if config.once {
        if scheduler.cycle() {
            return Ok(());
        }
        anyhow::bail!("synchronization cycle finished with errors");
    }

    tokio::select! {
        biased;
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl-C")?;
            reporter.info("Synchronization stopped");
            Ok(())
        }
        never = scheduler.run_forever() => match never {},
    }
}
