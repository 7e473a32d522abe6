//! Per-customer ordering session.

use crate::cart::{Cart, CartLine, CartTotals};
use crate::catalog::Catalog;
use crate::checkout::{
    CheckoutError, CheckoutFlow, Confirm, ContactDetails, ContactField, Submission,
};
use crate::error::CommerceError;
use crate::ids::ItemId;

/// Owns everything one customer edits: the menu they order from, their
/// cart, the checkout form, and the checkout flow.
///
/// Front ends hold a session and call into it for every user action
/// instead of keeping their own copies of cart or form state.
#[derive(Debug)]
pub struct OrderSession {
    catalog: Catalog,
    cart: Cart,
    contact: ContactDetails,
    checkout: CheckoutFlow,
}

impl OrderSession {
    /// Start a session with an empty cart and blank form.
    ///
    /// The cart totals in the currency of the first menu item.
    pub fn new(catalog: Catalog, checkout: CheckoutFlow) -> Self {
        let cart = match catalog.items().first() {
            Some(item) => Cart::with_currency(item.price.currency),
            None => Cart::new(),
        };
        Self {
            catalog,
            cart,
            contact: ContactDetails::default(),
            checkout,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn contact(&self) -> &ContactDetails {
        &self.contact
    }

    pub fn checkout(&self) -> &CheckoutFlow {
        &self.checkout
    }

    /// Add one unit of a menu item, creating its line if needed.
    pub fn add_to_cart(&mut self, id: ItemId) -> Result<&CartLine, CommerceError> {
        let item = self.catalog.get(id).ok_or(CommerceError::UnknownItem(id))?;
        self.cart.add_to_cart(item);
        self.cart.get(id).ok_or(CommerceError::UnknownItem(id))
    }

    /// Add one unit to a line already in the cart. No-op for other ids.
    pub fn increment_quantity(&mut self, id: ItemId) -> bool {
        self.cart.increment_quantity(id)
    }

    pub fn remove_from_cart(&mut self, id: ItemId) -> bool {
        self.cart.remove_from_cart(id)
    }

    pub fn set_contact_field(&mut self, field: ContactField, value: impl Into<String>) {
        self.contact.set(field, value);
    }

    pub fn totals(&self) -> Result<CartTotals, CommerceError> {
        self.cart.totals()
    }

    /// Run checkout over the session's cart and form.
    pub async fn submit<C>(&mut self, confirm: &mut C) -> Result<Submission, CheckoutError>
    where
        C: Confirm + ?Sized,
    {
        self.checkout
            .submit(&mut self.cart, &mut self.contact, confirm)
            .await
    }
}
