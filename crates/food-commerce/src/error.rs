//! Commerce error types.

use thiserror::Error;

use crate::ids::ItemId;

/// Errors that can occur in catalog and cart operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Item id is not on the menu.
    #[error("Item not found in catalog: {0}")]
    UnknownItem(ItemId),

    /// Two catalog entries share an id.
    #[error("Duplicate catalog item id: {0}")]
    DuplicateItem(ItemId),

    /// Catalog price below zero.
    #[error("Negative price for catalog item {0}")]
    NegativePrice(ItemId),

    /// Cart line with a quantity below 1.
    #[error("Invalid quantity for cart item {0}")]
    InvalidQuantity(ItemId),

    /// Cart line priced in a different currency than the cart.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}
