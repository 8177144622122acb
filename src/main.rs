use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use update_notifier::checker::UpdateSettings;
use update_notifier::cli::orchestration::{
    build_checker, open_storage, run_check_workflow, CheckWorkflowArgs, WorkflowResult,
};
use update_notifier::config::{self, Config};
use update_notifier::{compare_versions, parse_version, ui};

#[derive(Parser)]
#[command(
    name = "update-notifier",
    version,
    about = "Compare versions and track available application updates"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, global = true, help = "Override the state file path")]
    storage: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print -1, 0 or 1 comparing two versions
    Compare { v1: String, v2: String },

    /// Show the parsed components of a version
    Parse { version: String },

    /// Check whether LATEST is an update over the current version
    Check {
        latest: String,

        #[arg(long, help = "Current version (defaults to config or environment)")]
        current: Option<String>,

        #[arg(short, long, help = "Check even if the schedule is not due")]
        force: bool,
    },

    /// Stop notifying about a version
    Dismiss { version: String },

    /// Show recorded checks
    History,

    /// Delete recorded checks
    ClearHistory {
        #[arg(short, long, help = "Skip confirmation prompt")]
        yes: bool,
    },

    /// Show or change persisted settings
    Settings {
        #[arg(long)]
        auto_check: Option<bool>,

        #[arg(long)]
        notifications: Option<bool>,

        #[arg(long, help = "Forget the dismissed version")]
        clear_dismissed: bool,
    },
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

fn load(args_config: Option<&str>) -> Config {
    match config::load_config(args_config) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    match args.command {
        Command::Compare { v1, v2 } => {
            println!("{}", compare_versions(&v1, &v2));
        }
        Command::Parse { version } => {
            ui::display_parsed_version(&parse_version(&version));
        }
        Command::Check {
            latest,
            current,
            force,
        } => {
            let config = load(args.config.as_deref());
            let storage = open_storage(&config, args.storage)?;
            let workflow_args = CheckWorkflowArgs {
                latest,
                current,
                force,
            };
            match run_check_workflow(workflow_args, &config, storage, Utc::now())? {
                WorkflowResult::Checked(result) => ui::display_check_result(&result),
                WorkflowResult::Skipped { last_checked } => {
                    let when = last_checked
                        .map(|ts| ts.to_rfc3339())
                        .unwrap_or_else(|| "never".to_string());
                    ui::display_status(&format!(
                        "Check not due (last checked: {}). Use --force to check anyway.",
                        when
                    ));
                }
            }
        }
        Command::Dismiss { version } => {
            let config = load(args.config.as_deref());
            let checker = build_checker(&config, None, open_storage(&config, args.storage)?)?;
            checker.dismiss(&version)?;
            ui::display_success(&format!("Dismissed update {}", version));
        }
        Command::History => {
            let config = load(args.config.as_deref());
            let checker = build_checker(&config, None, open_storage(&config, args.storage)?)?;
            ui::display_history(&checker.history()?);
        }
        Command::ClearHistory { yes } => {
            let config = load(args.config.as_deref());
            let checker = build_checker(&config, None, open_storage(&config, args.storage)?)?;
            if !yes && !ui::confirm_action("Delete all recorded update checks?")? {
                println!("Operation cancelled by user.");
                return Ok(());
            }
            checker.clear_history()?;
            ui::display_success("Cleared update check history");
        }
        Command::Settings {
            auto_check,
            notifications,
            clear_dismissed,
        } => {
            let config = load(args.config.as_deref());
            let checker = build_checker(&config, None, open_storage(&config, args.storage)?)?;
            let current = checker.settings()?;
            let updated = UpdateSettings {
                auto_check: auto_check.unwrap_or(current.auto_check),
                notifications: notifications.unwrap_or(current.notifications),
                dismissed_version: if clear_dismissed {
                    None
                } else {
                    current.dismissed_version.clone()
                },
            };
            if updated != current {
                checker.save_settings(&updated)?;
                ui::display_success("Saved settings");
            }
            ui::display_settings(&updated);
        }
    }

    Ok(())
}
