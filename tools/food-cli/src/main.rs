//! Food CLI - Order from the menu in your terminal.
//!
//! Commands:
//! - `food menu` - List the menu
//! - `food order` - Place a single order
//! - `food shell` - Browse, fill the cart and check out interactively
//! - `food config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;
mod prompt;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConfigArgs, MenuArgs, OrderArgs, ShellArgs};

const DEFAULT_FILTER: &str = "food=info,food_commerce=info,food_notify=info";
const VERBOSE_FILTER: &str = "food=debug,food_commerce=debug,food_notify=debug";

/// Food CLI - Order food and get a confirmation email
#[derive(Parser)]
#[command(name = "food")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the menu
    Menu(MenuArgs),

    /// Place an order in one go
    Order(OrderArgs),

    /// Start an interactive ordering session
    Shell(ShellArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    let result = match cli.command {
        Commands::Menu(args) => commands::menu::run(args, &ctx).await,
        Commands::Order(args) => commands::order::run(args, &ctx).await,
        Commands::Shell(args) => commands::shell::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
