//! Order snapshot and its wire form.

use crate::cart::{Cart, CartLine};
use crate::checkout::ContactDetails;
use crate::ids::ItemId;
use crate::money::Money;
use serde::{Serialize, Serializer};
use std::fmt;

/// Cart and contact details captured at the moment of submission.
///
/// Built only to hand to the notifier; never retained by the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSnapshot {
    pub cart_items: Vec<CartLine>,
    pub user_details: ContactDetails,
}

impl OrderSnapshot {
    pub fn capture(cart: &Cart, contact: &ContactDetails) -> Self {
        Self {
            cart_items: cart.lines().to_vec(),
            user_details: contact.clone(),
        }
    }

    /// The JSON body sent to the notification endpoint.
    pub fn payload(&self) -> OrderPayload<'_> {
        OrderPayload {
            cart_items: self
                .cart_items
                .iter()
                .map(|line| PayloadLine {
                    id: line.id,
                    name: &line.name,
                    price: line.price,
                    quantity: line.quantity,
                })
                .collect(),
            user_details: &self.user_details,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.payload())
    }

    /// Human-readable summary shown before the order is placed.
    pub fn summary(&self) -> OrderSummary<'_> {
        OrderSummary { order: self }
    }
}

/// Wire form of an order:
/// `{ "cartItems": [{id, name, price, quantity}], "userDetails": {...} }`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload<'a> {
    pub cart_items: Vec<PayloadLine<'a>>,
    pub user_details: &'a ContactDetails,
}

#[derive(Debug, Serialize)]
pub struct PayloadLine<'a> {
    pub id: ItemId,
    pub name: &'a str,
    #[serde(serialize_with = "major_units")]
    pub price: Money,
    pub quantity: u32,
}

/// Prices go out as plain numbers in major units: `15` or `49.99`.
fn major_units<S: Serializer>(price: &Money, serializer: S) -> Result<S::Ok, S::Error> {
    let minor = 10_i64.pow(price.currency.decimal_places());
    if price.amount_cents % minor == 0 {
        serializer.serialize_i64(price.amount_cents / minor)
    } else {
        serializer.serialize_f64(price.to_decimal())
    }
}

/// Confirmation text for an order.
#[derive(Debug, Clone, Copy)]
pub struct OrderSummary<'a> {
    order: &'a OrderSnapshot,
}

impl OrderSummary<'_> {
    pub fn snapshot(&self) -> &OrderSnapshot {
        self.order
    }
}

impl fmt::Display for OrderSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let details = &self.order.user_details;
        writeln!(f, "Are the following details correct?")?;
        writeln!(f)?;
        writeln!(f, "Name: {}", details.name)?;
        writeln!(f, "Address: {}", details.address)?;
        writeln!(f, "Phone Number: {}", details.phone_number)?;
        writeln!(f)?;
        write!(f, "Items:")?;
        for line in &self.order.cart_items {
            write!(f, "\n- {} \u{00d7} {}", line.name, line.quantity)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogItem;
    use crate::money::Currency;

    fn snapshot() -> OrderSnapshot {
        let mut cart = Cart::new();
        cart.add_to_cart(&CatalogItem::new(1, "Strawberry", Money::from_major(15, Currency::USD)));
        cart.add_to_cart(&CatalogItem::new(2, "Mutton Fry", Money::from_decimal(35.5, Currency::USD)));
        cart.add_to_cart(&CatalogItem::new(2, "Mutton Fry", Money::from_decimal(35.5, Currency::USD)));
        let contact = ContactDetails::new("Asha", "12 Beach Rd", "98400", "asha@example.com");
        OrderSnapshot::capture(&cart, &contact)
    }

    #[test]
    fn test_payload_shape() {
        let json: serde_json::Value = serde_json::from_str(&snapshot().to_json().unwrap()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "cartItems": [
                    {"id": 1, "name": "Strawberry", "price": 15, "quantity": 1},
                    {"id": 2, "name": "Mutton Fry", "price": 35.5, "quantity": 2}
                ],
                "userDetails": {
                    "name": "Asha",
                    "address": "12 Beach Rd",
                    "phoneNumber": "98400",
                    "email": "asha@example.com"
                }
            })
        );
    }

    #[test]
    fn test_summary_lists_items() {
        let snapshot = snapshot();
        let text = snapshot.summary().to_string();
        assert!(text.contains("Name: Asha"));
        assert!(text.contains("Phone Number: 98400"));
        assert!(text.contains("- Strawberry \u{00d7} 1"));
        assert!(text.ends_with("- Mutton Fry \u{00d7} 2"));
        assert!(!text.contains("asha@example.com"));
    }
}
