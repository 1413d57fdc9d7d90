//! alert-worker: standalone scheduled alert engine.
//!
//! Reads rules from a YAML file and transactions from a JSON export,
//! evaluates rules on a fixed tick and writes `lastRun` back to the rule
//! file. Notifications go to the log sink.

use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tokio::sync::Notify;
use tracing::info;
use uuid::Uuid;

use ledger_core::config::{load_dotenv, Config};
use ledger_notify::{DispatchSink, Dispatcher, LogSink, TemplateRenderer};
use ledger_rules::defaults::default_rules;
use ledger_rules::store::{FileRuleStore, JsonTransactionSource};
use ledger_runner::{AlertEngine, EngineSettings, SystemClock};

// ── CLI ─────────────────────────────────────────────────────────────

/// Scheduled due-date alert worker.
#[derive(Parser, Debug)]
#[command(name = "alert-worker", version, about)]
struct Cli {
    /// Config profile; keys are read as {PROFILE}_{KEY} before {KEY}.
    #[arg(long, env = "LEDGER_PROFILE")]
    profile: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tick until interrupted (default).
    Run,
    /// Run a single pass now and print its report.
    Check,
    /// Send a sample notification for one rule.
    TestRule {
        id: Uuid,
    },
    /// Print the current alerts as JSON.
    Alerts,
    /// Print the effective configuration as JSON.
    Config,
    /// Write the default rule set to the rules file.
    Seed {
        /// Overwrite an existing rules file.
        #[arg(long)]
        force: bool,
    },
}

// ── main ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    load_dotenv();
    let cli = Cli::parse();

    let config = match &cli.profile {
        Some(p) => Config::for_profile(p),
        None => Config::from_env(),
    };
    config.validate().context("invalid alert configuration")?;
    config.log_summary();

    let rule_store = Arc::new(FileRuleStore::new(&config.storage.rules_file));

    let transactions = Arc::new(JsonTransactionSource::new(&config.storage.transactions_file));
    let settings = EngineSettings::from_config(&config.alerts);
    let renderer =
        TemplateRenderer::new(config.alerts.currency_symbol.clone()).with_offset(settings.utc_offset);
    let sinks: Vec<Box<dyn DispatchSink>> = vec![Box::new(LogSink::new())];
    let dispatcher = Dispatcher::new(sinks, config.alerts.dispatch_timeout()).with_renderer(renderer);

    let engine = AlertEngine::new(
        rule_store.clone(),
        transactions,
        Arc::new(dispatcher),
        Arc::new(SystemClock),
        settings,
    );

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            let shutdown = Arc::new(Notify::new());
            let signal = shutdown.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("Interrupt received, shutting down");
                    signal.notify_waiters();
                }
            });

            info!("alert-worker starting");
            engine.run(shutdown).await;
            info!("alert-worker exited cleanly");
        }
        Command::Check => {
            let report = engine.tick().await;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::TestRule { id } => {
            let results = engine.test_rule(id).await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Command::Alerts => {
            let alerts = engine.current_alerts().await?;
            println!("{}", serde_json::to_string_pretty(&alerts)?);
        }
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config.summary())?);
        }
        Command::Seed { force } => {
            if rule_store.exists().await && !force {
                bail!(
                    "{} already exists, pass --force to overwrite",
                    rule_store.path().display()
                );
            }
            let rules = default_rules();
            rule_store.write_rules(&rules).await?;
            info!(count = rules.len(), path = %rule_store.path().display(), "Seeded default rules");
        }
    }

    Ok(())
}
