//! CLI configuration.

use std::path::Path;

use anyhow::{bail, Context, Result};
use food_commerce::catalog::{default_menu, Catalog, CatalogItem};
use food_commerce::checkout::ResetPolicy;
use food_commerce::money::{Currency, Money};
use food_notify::NotifyPolicy;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where placed orders are sent.
    #[serde(default)]
    pub notify: NotifyPolicy,

    /// Checkout behaviour.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Menu override.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Build the menu: configured items, or the house menu when none are set.
    pub fn build_catalog(&self) -> Result<Catalog> {
        if self.catalog.items.is_empty() {
            return Ok(Catalog::default());
        }

        let currency = Currency::from_code(&self.catalog.currency)
            .with_context(|| format!("Unknown currency: {}", self.catalog.currency))?;

        let mut items = Vec::with_capacity(self.catalog.items.len());
        for item in &self.catalog.items {
            if !item.price.is_finite() {
                bail!("Invalid price for catalog item {}: {}", item.id, item.price);
            }
            items.push(CatalogItem::new(
                item.id,
                item.name.clone(),
                Money::from_decimal(item.price, currency),
            ));
        }

        Catalog::new(items).context("Invalid catalog in config")
    }
}

/// Checkout settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// When the cart and form are cleared after a confirmed order.
    #[serde(default)]
    pub reset_policy: ResetPolicy,
}

/// Menu settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Currency code for configured prices.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Menu items. Empty means the house menu.
    #[serde(default)]
    pub items: Vec<MenuItemConfig>,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            items: Vec::new(),
        }
    }
}

/// One configured menu item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemConfig {
    pub id: u32,
    pub name: String,
    /// Price in major units, e.g. `15.0`.
    pub price: f64,
}

/// Generate a default food.toml config file.
pub fn generate_default_config() -> String {
    let mut content = String::from(
        r#"# Food ordering configuration

[notify]
endpoint = "http://localhost:2000/email"
connect_timeout_secs = 3
timeout_secs = 10

[checkout]
# "optimistic" clears the cart as soon as the order is sent;
# "await_acknowledgement" waits for the email service first.
reset_policy = "optimistic"

[catalog]
currency = "USD"
"#,
    );

    for item in default_menu() {
        content.push_str(&format!(
            "\n[[catalog.items]]\nid = {}\nname = \"{}\"\nprice = {:.2}\n",
            item.id,
            item.name,
            item.price.to_decimal()
        ));
    }

    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use food_commerce::ItemId;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.notify.endpoint, "http://localhost:2000/email");
        assert_eq!(config.checkout.reset_policy, ResetPolicy::Optimistic);
        assert_eq!(config.build_catalog().unwrap(), Catalog::default());
    }

    #[test]
    fn test_generated_config_round_trips() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        let catalog = config.build_catalog().unwrap();
        assert_eq!(catalog, Catalog::default());
    }

    #[test]
    fn test_custom_catalog_and_policy() {
        let config: CliConfig = toml::from_str(
            r#"
            [checkout]
            reset_policy = "await_acknowledgement"

            [catalog]
            currency = "INR"

            [[catalog.items]]
            id = 10
            name = "Fish Curry"
            price = 120.5
            "#,
        )
        .unwrap();

        assert_eq!(config.checkout.reset_policy, ResetPolicy::AwaitAcknowledgement);
        let catalog = config.build_catalog().unwrap();
        let curry = catalog.get(ItemId::new(10)).unwrap();
        assert_eq!(curry.price, Money::new(12050, Currency::INR));
    }

    #[test]
    fn test_non_finite_prices_rejected() {
        for price in ["nan", "inf", "-inf"] {
            let config: CliConfig = toml::from_str(&format!(
                "[[catalog.items]]\nid = 1\nname = \"Tea\"\nprice = {price}\n"
            ))
            .unwrap();
            let err = config.build_catalog().unwrap_err();
            assert!(err.to_string().contains("Invalid price for catalog item 1"), "{err}");
        }
    }

    #[test]
    fn test_load_picks_format_by_extension() {
        let dir = std::env::temp_dir().join(format!("food-cli-load-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let json = dir.join("food.json");
        let toml_path = dir.join("food.toml");
        std::fs::write(&json, r#"{"checkout":{"reset_policy":"await_acknowledgement"}}"#).unwrap();
        std::fs::write(&toml_path, "[notify]\ntimeout_secs = 30\n").unwrap();

        let from_json = CliConfig::load(&json);
        let from_toml = CliConfig::load(&toml_path);
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(
            from_json.unwrap().checkout.reset_policy,
            ResetPolicy::AwaitAcknowledgement
        );
        assert_eq!(from_toml.unwrap().notify.timeout_secs, 30);
    }

    #[test]
    fn test_duplicate_catalog_ids_rejected() {
        let config: CliConfig = toml::from_str(
            r#"
            [[catalog.items]]
            id = 1
            name = "Tea"
            price = 1.0

            [[catalog.items]]
            id = 1
            name = "Coffee"
            price = 2.0
            "#,
        )
        .unwrap();
        assert!(config.build_catalog().is_err());
    }
}
