use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_guard::cli::Output;
use agent_guard::cli::commands;
use agent_guard::config::{Config, ConfigLoader};
use agent_guard::generators::Generator;

/// Parse generator name from string
fn parse_generator(s: &str) -> Result<Generator, String> {
    match s.to_lowercase().as_str() {
        "env" => Ok(Generator::Env),
        "api-routes" => Ok(Generator::ApiRoutes),
        _ => Err(format!(
            "Invalid generator '{}'. Valid values: env, api-routes",
            s
        )),
    }
}

#[derive(Parser)]
#[command(name = "agent-guard")]
#[command(
    version,
    about = "Keeps project documentation in step with the code it describes"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "Project root (default: current directory)")]
    root: Option<PathBuf>,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Git pre-commit hook: detect stale docs and try to fix them
    PreCommit,

    /// Lint the architecture doc and generated docs (for CI)
    CheckDocs,

    /// Regenerate a reference doc
    Generate {
        #[arg(value_parser = parse_generator, help = "Generator: env, api-routes")]
        generator: Generator,
    },

    /// Show recent hook runs from the audit log
    History {
        #[arg(short = 'n', long, default_value = "20", help = "Number of entries")]
        limit: usize,
        #[arg(long, help = "Print raw JSON entries")]
        json: bool,
    },

    /// Write a starter config and install the git hook
    Init {
        #[arg(long, short, help = "Overwrite existing config and hook")]
        force: bool,
        #[arg(long = "no-hook", help = "Skip installing the pre-commit hook")]
        no_hook: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ agent-guard internal error ━━━\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    // stdout belongs to the hook report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    let output = Output::new(cli.quiet);

    match cli.command {
        Commands::Init { force, no_hook } => {
            commands::init::run(&root, force, !no_hook, &output)?;
        }
        Commands::PreCommit => {
            let config = load_config(&root)?;
            commands::pre_commit::run(&config);
        }
        Commands::CheckDocs => {
            let config = load_config(&root)?;
            commands::check_docs::run(&config, &output)?;
        }
        Commands::Generate { generator } => {
            let config = load_config(&root)?;
            commands::generate::run(&config, generator, &output)?;
        }
        Commands::History { limit, json } => {
            let config = load_config(&root)?;
            commands::history::run(&config, limit, json, &output)?;
        }
    }

    Ok(())
}

fn load_config(root: &std::path::Path) -> anyhow::Result<Config> {
    Ok(ConfigLoader::load(root)?)
}
