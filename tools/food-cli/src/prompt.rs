//! Interactive order confirmation.

use dialoguer::Confirm as ConfirmPrompt;
use food_commerce::checkout::{Confirm, OrderSummary};

use crate::output::Output;

/// Shows the order summary and asks the customer to confirm it.
pub struct PromptConfirm {
    output: Output,
    assume_yes: bool,
}

impl PromptConfirm {
    pub fn new(output: Output, assume_yes: bool) -> Self {
        Self { output, assume_yes }
    }
}

impl Confirm for PromptConfirm {
    fn confirm(&mut self, summary: &OrderSummary<'_>) -> bool {
        self.output.text("");
        self.output.text(&summary.to_string());
        self.output.text("");

        if self.assume_yes {
            return true;
        }

        match ConfirmPrompt::new()
            .with_prompt("Place this order?")
            .default(true)
            .interact()
        {
            Ok(confirmed) => confirmed,
            Err(e) => {
                tracing::warn!(error = %e, "confirmation prompt failed, treating as declined");
                false
            }
        }
    }
}
