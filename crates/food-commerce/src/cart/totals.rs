//! Cart totals.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Totals derived from the current cart contents.
///
/// Never stored; recomputed from the lines on every read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of line quantities.
    pub total_quantity: u64,
    /// Sum of `price * quantity` over all lines.
    pub total_cost: Money,
}

impl CartTotals {
    /// Totals of an empty cart.
    pub fn empty(total_cost: Money) -> Self {
        Self {
            total_quantity: 0,
            total_cost,
        }
    }
}
