//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use food_commerce::checkout::{CheckoutFlow, LogNotifier, OrderNotifier, ResetPolicy};
use food_commerce::OrderSession;
use food_notify::HttpNotifier;

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["food.toml", ".food.toml", "food.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(Path::new(path))?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(&config_path) {
                        Ok(config) => {
                            tracing::debug!(path = %config_path.display(), "loaded config");
                            return Some(config);
                        }
                        Err(e) => {
                            tracing::warn!(path = %config_path.display(), error = %e, "ignoring unreadable config");
                        }
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Start an ordering session wired to the configured notifier.
    ///
    /// `dry_run` logs orders instead of sending them. `policy` overrides
    /// the configured reset policy.
    pub fn session(&self, dry_run: bool, policy: Option<ResetPolicy>) -> Result<OrderSession> {
        let catalog = self.config.build_catalog()?;

        let notifier: Arc<dyn OrderNotifier> = if dry_run {
            Arc::new(LogNotifier)
        } else {
            Arc::new(
                HttpNotifier::new(&self.config.notify)
                    .context("Failed to set up order notifications")?,
            )
        };

        let policy = policy.unwrap_or(self.config.checkout.reset_policy);
        let flow = CheckoutFlow::new(notifier).with_policy(policy);

        Ok(OrderSession::new(catalog, flow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_find_config_in_non_utf8_dir() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let root = std::env::temp_dir().join(format!("food-cli-find-{}", std::process::id()));
        let dir = root.join(OsStr::from_bytes(b"caf\xe9"));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("food.toml"),
            "[checkout]\nreset_policy = \"await_acknowledgement\"\n",
        )
        .unwrap();

        let config = Context::find_config(&dir.join("nested-missing"));
        let direct = Context::find_config(&dir);
        std::fs::remove_dir_all(&root).unwrap();

        assert_eq!(
            config.unwrap().checkout.reset_policy,
            ResetPolicy::AwaitAcknowledgement
        );
        assert!(direct.is_some());
    }
}
