//! Output formatting for the CLI.

use console::style;
use food_commerce::cart::{Cart, CartTotals};
use food_commerce::catalog::Catalog;
use food_commerce::checkout::{Notice, NoticeLevel};
use indicatif::{ProgressBar, ProgressStyle};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a block of text as-is.
    pub fn text(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{}", msg);
    }

    /// Print a checkout notice the way a toast would show it.
    pub fn notice(&self, notice: Notice) {
        match notice.level() {
            NoticeLevel::Success => self.success(notice.message()),
            NoticeLevel::Error => self.error(notice.message()),
        }
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print the menu.
    pub fn catalog(&self, catalog: &Catalog) {
        let widths = [4, 16, 10];
        self.table_row(&["ID", "Item", "Price"], &widths);
        for item in catalog.items() {
            self.table_row(
                &[&item.id.to_string(), &item.name, &item.price.display()],
                &widths,
            );
        }
    }

    /// Print cart lines and the order summary totals.
    pub fn cart(&self, cart: &Cart, totals: &CartTotals) {
        if cart.is_empty() {
            self.info("Cart is empty");
        } else {
            let widths = [4, 16, 10, 4];
            self.table_row(&["ID", "Item", "Price", "Qty"], &widths);
            for line in cart.lines() {
                self.table_row(
                    &[
                        &line.id.to_string(),
                        &line.name,
                        &line.price.display(),
                        &line.quantity.to_string(),
                    ],
                    &widths,
                );
            }
        }
        self.kv("Total Quantity", &totals.total_quantity.to_string());
        self.kv("Total Cost", &totals.total_cost.display());
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Flip between colored and plain output. Returns whether colors are now on.
    pub fn toggle_colors(&self) -> bool {
        let enabled = !console::colors_enabled();
        console::set_colors_enabled(enabled);
        enabled
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}
