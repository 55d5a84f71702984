mod ai;
mod app;
mod config;
mod constants;
mod input;
mod store;
mod ui;

use anyhow::Result;
use std::env;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::config::Config;
use crate::store::{PromptSet, PromptStore};

/// Sample inbox seeded by `mailmind setup`.
const SAMPLE_INBOX: &str = include_str!("../assets/mock_inbox.json");

fn setup_logging() {
    use std::fs::OpenOptions;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mailmind=debug"));

    // The terminal belongs to the TUI, so log to a file in the config
    // directory and fall back to stderr only if that fails
    let log_file = Config::config_dir()
        .ok()
        .map(|dir| dir.join("mailmind.log"))
        .and_then(|path| {
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)
                .ok()
        });

    if let Some(file) = log_file {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_usage() {
    eprintln!(
        r#"mailmind - Prompt-driven email productivity agent

Usage: mailmind [command]

Commands:
    (none)      Start the terminal interface
    setup       Write default config, prompts, and a sample inbox
    help        Show this help message

Configuration file: ~/.config/mailmind/config.toml
Set MAILMIND_API_KEY (or [model].api_key) to enable model calls.
"#
    );
}

fn run_setup() -> Result<()> {
    use std::io::{self, Write};

    println!("Mailmind Setup");
    println!("==============\n");

    let config_path = Config::config_path()?;
    if config_path.exists() {
        print!("Configuration already exists. Overwrite? [y/N]: ");
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Setup cancelled.");
            return Ok(());
        }
    }

    let config = Config::default();
    config.ensure_dirs()?;
    config.save()?;
    println!("Configuration saved to {}", config_path.display());

    // Seed the data documents, but never clobber existing ones
    let prompts_path = config.store.prompts_path()?;
    if prompts_path.exists() {
        println!("Keeping existing prompts at {}", prompts_path.display());
    } else {
        PromptStore::new(prompts_path.clone()).save(&PromptSet::default())?;
        println!("Default prompts written to {}", prompts_path.display());
    }

    let inbox_path = config.store.inbox_path()?;
    if inbox_path.exists() {
        println!("Keeping existing inbox at {}", inbox_path.display());
    } else {
        std::fs::write(&inbox_path, SAMPLE_INBOX)?;
        println!("Sample inbox written to {}", inbox_path.display());
    }

    println!("\nSet MAILMIND_API_KEY (or [model].api_key in the config file)");
    println!("to enable model calls; without it the agent runs degraded.");
    println!("\nSetup complete! Run 'mailmind' to start.");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("help") | Some("--help") | Some("-h") => {
            print_usage();
            Ok(())
        }
        Some("setup") => run_setup(),
        Some(cmd) => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            std::process::exit(1);
        }
        None => {
            setup_logging();

            let config = Config::load()?;
            config.ensure_dirs()?;

            let mut app = App::new(config)?;
            app.run().await
        }
    }
}
