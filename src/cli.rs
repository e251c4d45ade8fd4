// CLI module - command-line argument parsing and handlers
//
// No subcommand runs the TUI. Subcommands:
// - list/add/vote: headless access to the fact board
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --edit: Open config file in $EDITOR
// - config --path: Show config file path

use crate::config::{Config, VERSION};
use crate::facts::{validate_new_fact, CategorySelection, Fact, FactId, VoteKind};
use crate::store::{FactQuery, FactStore};
use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::Command;

/// Today I learned - share and vote on short facts
#[derive(Parser, Debug)]
#[command(name = "til")]
#[command(version = VERSION)]
#[command(about = "Share and vote on interesting facts", long_about = None)]
pub struct Cli {
    /// Use an in-memory board seeded with sample facts
    #[arg(long, global = true)]
    pub demo: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print facts, ordered by text descending
    List {
        /// Category name, or "all"
        #[arg(long, short)]
        category: Option<String>,
    },

    /// Post a new fact
    Add {
        /// The fact itself (max 200 characters)
        #[arg(long)]
        text: String,

        /// Trustworthy source (http or https URL)
        #[arg(long)]
        source: String,

        /// Category name
        #[arg(long, short)]
        category: String,
    },

    /// Vote on a fact
    Vote {
        /// Fact id
        id: i64,

        /// interesting, mindblowing or false
        kind: VoteKind,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Run a headless store command, writing results to `out`
pub async fn run_command(
    command: Commands,
    store: &dyn FactStore,
    config: &Config,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Commands::List { category } => {
            let selection = match category {
                Some(name) => CategorySelection::parse(&name)
                    .ok_or_else(|| anyhow!("Unknown category '{}'", name))?,
                None => CategorySelection::All,
            };
            list(store, selection, config.fetch_limit, out).await
        }
        Commands::Add {
            text,
            source,
            category,
        } => add(store, &text, &source, &category, out).await,
        Commands::Vote { id, kind } => vote(store, FactId(id), kind, out).await,
        Commands::Config {
            show,
            reset,
            edit,
            path,
        } => handle_config(show, reset, edit, path),
    }
}

async fn list(
    store: &dyn FactStore,
    selection: CategorySelection,
    limit: usize,
    out: &mut dyn Write,
) -> Result<()> {
    let facts = store
        .select(FactQuery::new(selection, limit))
        .await
        .with_context(|| format!("Failed to load facts for {}", selection))?;

    if facts.is_empty() {
        writeln!(out, "No facts for this category yet.")?;
        return Ok(());
    }
    for fact in &facts {
        writeln!(out, "{}", format_fact(fact))?;
    }
    writeln!(out)?;
    writeln!(out, "There are only {} facts. Add your own!", facts.len())?;
    Ok(())
}

async fn add(
    store: &dyn FactStore,
    text: &str,
    source: &str,
    category: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let new_fact = validate_new_fact(text, source, category)?;
    let fact = store
        .insert(new_fact)
        .await
        .context("Failed to post fact")?;
    writeln!(out, "Posted fact #{}", fact.id)?;
    writeln!(out, "{}", format_fact(&fact))?;
    Ok(())
}

async fn vote(
    store: &dyn FactStore,
    id: FactId,
    kind: VoteKind,
    out: &mut dyn Write,
) -> Result<()> {
    let Some(fact) = store
        .fetch(id)
        .await
        .with_context(|| format!("Failed to look up fact #{}", id))?
    else {
        bail!("No fact with id {}", id);
    };

    let updated = store
        .update(id, fact.vote_patch(kind))
        .await
        .with_context(|| format!("Failed to vote on fact #{}", id))?;
    writeln!(out, "{}", format_fact(&updated))?;
    Ok(())
}

/// One-line rendering used by the headless commands
pub fn format_fact(fact: &Fact) -> String {
    let disputed = if fact.is_disputed() {
        "[⛔DISPUTED] "
    } else {
        ""
    };
    let counters: Vec<String> = VoteKind::ALL
        .iter()
        .map(|kind| format!("{} {}", kind.emoji(), fact.votes(*kind)))
        .collect();
    format!(
        "#{:<5} {}{} ({}) [{}] {}",
        fact.id,
        disputed,
        fact.text,
        fact.source,
        fact.category,
        counters.join("  ")
    )
}

/// Config subcommand; needs no store
pub fn handle_config(show: bool, reset: bool, edit: bool, path: bool) -> Result<()> {
    if path {
        handle_config_path()
    } else if show {
        handle_config_show();
        Ok(())
    } else if reset {
        handle_config_reset()
    } else if edit {
        handle_config_edit()
    } else {
        // No flag provided, show help
        println!("Usage: til config [--show|--reset|--edit|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --edit    Open config file in $EDITOR");
        println!("  --path    Show config file path");
        Ok(())
    }
}

fn config_path() -> Result<std::path::PathBuf> {
    Config::config_path().context("Could not determine config path")
}

fn handle_config_path() -> Result<()> {
    println!("{}", config_path()?.display());
    Ok(())
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("store_url = {:?}", config.store_url);
    println!(
        "api_key = {}",
        if config.api_key.is_some() {
            "\"<set>\""
        } else {
            "<unset>"
        }
    );
    println!("table = {:?}", config.table);
    println!("fetch_limit = {}", config.fetch_limit);
    println!("request_timeout_secs = {}", config.request_timeout_secs);
    println!("theme = {:?}", config.theme);
    println!("demo_mode = {}", config.demo_mode);
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);
    println!("file_dir = {:?}", config.logging.file_dir);
    println!("file_rotation = {:?}", config.logging.file_rotation.as_str());
    println!("file_prefix = {:?}", config.logging.file_prefix);

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() -> Result<()> {
    let path = config_path()?;

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read confirmation")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(&path, Config::default().to_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

fn handle_config_edit() -> Result<()> {
    let path = config_path()?;

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    let status = Command::new(&editor).arg(&path).status().with_context(|| {
        format!(
            "Failed to launch editor '{}'; set $EDITOR to your preferred editor",
            editor
        )
    })?;

    if !status.success() {
        bail!("Editor exited with status: {}", status);
    }
    Ok(())
}
