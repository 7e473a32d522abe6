//! Catalog item type.

use crate::ids::ItemId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A purchasable item on the menu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogItem {
    /// Unique item identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Money,
}

impl CatalogItem {
    /// Create a new catalog item.
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}
