//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use food_notify::HttpNotifier;

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    ctx.output.text("");
    ctx.output.text("[notify]");
    ctx.output.kv("endpoint", &ctx.config.notify.endpoint);
    ctx.output.kv(
        "connect_timeout_secs",
        &ctx.config.notify.connect_timeout_secs.to_string(),
    );
    ctx.output.kv("timeout_secs", &ctx.config.notify.timeout_secs.to_string());

    ctx.output.text("");
    ctx.output.text("[checkout]");
    ctx.output.kv("reset_policy", ctx.config.checkout.reset_policy.as_str());

    ctx.output.text("");
    ctx.output.text("[catalog]");
    ctx.output.kv("currency", &ctx.config.catalog.currency);
    if ctx.config.catalog.items.is_empty() {
        ctx.output.kv("items", "(house menu)");
    } else {
        ctx.output.kv("items", &ctx.config.catalog.items.len().to_string());
    }

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    match ctx.config.build_catalog() {
        Ok(catalog) if catalog.is_empty() => warnings.push("catalog has no items".to_string()),
        Ok(catalog) => ctx.output.debug(&format!("catalog: {} items", catalog.len())),
        Err(e) => errors.push(format!("catalog: {:#}", e)),
    }

    if let Err(e) = HttpNotifier::new(&ctx.config.notify) {
        errors.push(format!("notify: {}", e));
    }

    if ctx.config.notify.timeout_secs < ctx.config.notify.connect_timeout_secs {
        warnings.push("notify.timeout_secs is shorter than notify.connect_timeout_secs".to_string());
    }

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
