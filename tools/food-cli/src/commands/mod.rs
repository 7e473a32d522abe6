//! CLI command implementations.

pub mod config;
pub mod menu;
pub mod order;
pub mod shell;

use clap::{Args, Subcommand};
use food_commerce::ItemId;

/// Arguments for the menu command.
#[derive(Args)]
pub struct MenuArgs {}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    /// Menu item to add, once per unit (e.g. `-i 2 -i 2` for two).
    #[arg(short, long = "item", required = true)]
    pub items: Vec<ItemId>,

    /// Customer name.
    #[arg(long, default_value = "")]
    pub name: String,

    /// Delivery address.
    #[arg(long, default_value = "")]
    pub address: String,

    /// Phone number.
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Email for the order confirmation.
    #[arg(long, default_value = "")]
    pub email: String,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,

    /// Log the order instead of sending it.
    #[arg(long)]
    pub dry_run: bool,

    /// Keep the order unless the email service accepts it.
    #[arg(long)]
    pub await_ack: bool,
}

/// Arguments for the shell command.
#[derive(Args)]
pub struct ShellArgs {
    /// Log orders instead of sending them.
    #[arg(long)]
    pub dry_run: bool,

    /// Keep the cart until the email service accepts the order.
    #[arg(long)]
    pub await_ack: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
