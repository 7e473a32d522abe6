//! Cart and cart line types.

use crate::cart::CartTotals;
use crate::catalog::CatalogItem;
use crate::error::CommerceError;
use crate::ids::ItemId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// One catalog item's entry in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    /// Catalog item this line refers to.
    pub id: ItemId,
    /// Item name (denormalized for display).
    pub name: String,
    /// Unit price at the time the item was added.
    pub price: Money,
    /// Quantity, always at least 1.
    pub quantity: u32,
}

impl CartLine {
    fn from_item(item: &CatalogItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            price: item.price,
            quantity: 1,
        }
    }

    /// Line subtotal (`price * quantity`), `None` on overflow.
    pub fn subtotal(&self) -> Option<Money> {
        self.price.try_multiply(i64::from(self.quantity))
    }
}

/// A session-scoped shopping cart.
///
/// Lines keep the order in which items were first added and there is at
/// most one line per item id. Quantities only grow through
/// [`Cart::add_to_cart`] and [`Cart::increment_quantity`]; the only way to
/// shrink the cart is removing a whole line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(try_from = "CartRepr")]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: Currency,
}

/// Unchecked serde form of [`Cart`].
#[derive(Deserialize)]
struct CartRepr {
    lines: Vec<CartLine>,
    #[serde(default)]
    currency: Currency,
}

impl TryFrom<CartRepr> for Cart {
    type Error = CommerceError;

    fn try_from(repr: CartRepr) -> Result<Self, Self::Error> {
        for (i, line) in repr.lines.iter().enumerate() {
            if line.quantity == 0 {
                return Err(CommerceError::InvalidQuantity(line.id));
            }
            if repr.lines[..i].iter().any(|l| l.id == line.id) {
                return Err(CommerceError::DuplicateItem(line.id));
            }
        }
        Ok(Self {
            lines: repr.lines,
            currency: repr.currency,
        })
    }
}

impl Cart {
    /// Create an empty cart in the default currency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cart totalling in `currency`.
    pub fn with_currency(currency: Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add one unit of `item`.
    ///
    /// Bumps the existing line for `item.id`, or appends a new line with
    /// quantity 1 after the existing ones.
    pub fn add_to_cart(&mut self, item: &CatalogItem) {
        if let Some(line) = self.line_mut(item.id) {
            line.quantity = line.quantity.saturating_add(1);
            tracing::debug!(item = %item.id, quantity = line.quantity, "incremented cart line");
            return;
        }
        self.lines.push(CartLine::from_item(item));
        tracing::debug!(item = %item.id, name = %item.name, "added cart line");
    }

    /// Add one unit to an existing line.
    ///
    /// Only increments: returns `false` and leaves the cart untouched when
    /// no line for `id` exists. Use [`Cart::add_to_cart`] to create lines.
    pub fn increment_quantity(&mut self, id: ItemId) -> bool {
        match self.line_mut(id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1);
                tracing::debug!(item = %id, quantity = line.quantity, "incremented cart line");
                true
            }
            None => false,
        }
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove_from_cart(&mut self, id: ItemId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| l.id != id);
        let removed = self.lines.len() < len_before;
        if removed {
            tracing::debug!(item = %id, "removed cart line");
        }
        removed
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Compute total quantity and total cost.
    pub fn totals(&self) -> Result<CartTotals, CommerceError> {
        let mut totals = CartTotals::empty(Money::zero(self.currency));
        for line in &self.lines {
            if line.price.currency != self.currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: self.currency.code().to_string(),
                    got: line.price.currency.code().to_string(),
                });
            }
            let subtotal = line.subtotal().ok_or(CommerceError::Overflow)?;
            totals.total_cost = totals
                .total_cost
                .try_add(&subtotal)
                .ok_or(CommerceError::Overflow)?;
            totals.total_quantity += u64::from(line.quantity);
        }
        Ok(totals)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the line for an item.
    pub fn get(&self, id: ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    fn line_mut(&mut self, id: ItemId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.id == id)
    }
}
