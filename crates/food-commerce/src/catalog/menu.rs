//! The fixed menu.

use std::collections::HashSet;

use crate::catalog::CatalogItem;
use crate::error::CommerceError;
use crate::ids::ItemId;
use crate::money::{Currency, Money};

/// An ordered, immutable set of catalog items with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and negative prices.
    pub fn new(items: Vec<CatalogItem>) -> Result<Self, CommerceError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(CommerceError::DuplicateItem(item.id));
            }
            if item.price.is_negative() {
                return Err(CommerceError::NegativePrice(item.id));
            }
        }
        Ok(Self { items })
    }

    /// Look up an item by id.
    pub fn get(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Items in menu order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            items: default_menu(),
        }
    }
}

/// The house menu.
pub fn default_menu() -> Vec<CatalogItem> {
    let usd = |amount| Money::from_major(amount, Currency::USD);
    vec![
        CatalogItem::new(1, "Strawberry", usd(15)),
        CatalogItem::new(2, "Mutton Fry", usd(35)),
        CatalogItem::new(3, "Fire Burger", usd(305)),
        CatalogItem::new(4, "Pizza", usd(350)),
        CatalogItem::new(5, "Burger", usd(35)),
        CatalogItem::new(6, "Chicken", usd(100)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_menu() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), 6);
        let pizza = catalog.get(ItemId::new(4)).unwrap();
        assert_eq!(pizza.name, "Pizza");
        assert_eq!(pizza.price.amount_cents, 35_000);
        assert!(catalog.get(ItemId::new(7)).is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let usd = Money::from_major(1, Currency::USD);
        let result = Catalog::new(vec![
            CatalogItem::new(1, "Tea", usd),
            CatalogItem::new(1, "Coffee", usd),
        ]);
        assert!(matches!(result, Err(CommerceError::DuplicateItem(id)) if id == ItemId::new(1)));
    }

    #[test]
    fn test_negative_price_rejected() {
        let result = Catalog::new(vec![CatalogItem::new(
            9,
            "Refund",
            Money::new(-100, Currency::USD),
        )]);
        assert!(matches!(result, Err(CommerceError::NegativePrice(_))));
    }

    #[test]
    fn test_menu_order_preserved() {
        let catalog = Catalog::default();
        let names: Vec<&str> = catalog.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            ["Strawberry", "Mutton Fry", "Fire Burger", "Pizza", "Burger", "Chicken"]
        );
    }
}
