//! CLI entry point for duedeck.

use std::env;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use time::Date;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use duedeck_app::config::{AppConfig, DATA_ENV, resolve_data_file};
use duedeck_app::{SystemClock, TaskRepository};
use duedeck_core::date::parse_date;
use duedeck_core::{Category, ParseError, Priority, Recurrence, TaskId};
use duedeck_store_fs::FileStore;

mod commands;
mod config;
mod tui;

/// Bills, tax deadlines and business chores tracked from the terminal.
#[derive(Parser, Debug)]
#[command(name = "duedeck", version, about = "duedeck: reminders for bills, taxes and everything due")]
struct Cli {
    /// Tasks file (overrides $DUEDECK_DATA and the config file).
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Configuration file (defaults to the platform config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Launch the interactive terminal UI (default).
    Tui,

    /// List tasks, pending first.
    Ls {
        /// Only tasks in this category.
        #[arg(long)]
        category: Option<Category>,
        /// Case-insensitive text searched in title and description.
        #[arg(long)]
        search: Option<String>,
    },

    /// Create a task.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "personal")]
        category: Category,
        #[arg(long)]
        sub_category: Option<String>,
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Due date as YYYY-MM-DD (defaults to today).
        #[arg(long, value_parser = parse_due_date)]
        due: Option<Date>,
        #[arg(long)]
        repeat: Option<Recurrence>,
    },

    /// Flip completion of a task.
    Toggle { id: TaskId },

    /// Delete a task.
    Rm { id: TaskId },

    /// Print a task as JSON.
    Show { id: TaskId },

    /// Print the dashboard: overdue, due today and per-category progress.
    Summary,

    /// Manage the configuration file.
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default configuration.
    Init {
        /// Destination (defaults to the platform config directory).
        #[arg(long)]
        output: Option<PathBuf>,
        /// Overwrite without asking.
        #[arg(long)]
        force: bool,
    },
}

fn parse_due_date(raw: &str) -> Result<Date, ParseError> {
    parse_date(raw)
}

fn main() -> Result<()> {
    let Cli { data, config, cmd } = Cli::parse();
    install_tracing();

    let command = cmd.unwrap_or(Command::Tui);
    if let Command::Config {
        action: ConfigCommand::Init { output, force },
    } = &command
    {
        return config::init_config(output.as_deref(), *force);
    }

    let app_config = AppConfig::load(config.as_deref())?;
    let data_file = resolve_data_file(data.as_deref(), env::var_os(DATA_ENV), &app_config.storage)?;
    let repo = TaskRepository::load(FileStore::new(&data_file), SystemClock)
        .with_context(|| format!("Failed to load tasks from {}", data_file.display()))?;

    match command {
        Command::Tui => {
            let keybindings = tui::load_keybindings(config.as_deref())?;
            let options = tui::TuiOptions {
                start_view: app_config.tui.start_view,
                config_path: config.or_else(duedeck_app::config::default_config_path),
            };
            tui::run(repo, keybindings, options)
        }
        other => {
            let mut repo = repo;
            commands::run(other, &mut repo, &mut io::stdout().lock())
        }
    }
}

fn install_tracing() {
    // RUST_LOG is honoured; INFO by default. Logs go to stderr so listings stay pipeable.
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
}
