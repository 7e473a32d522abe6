//! Catalog, cart and checkout logic for the food ordering app.
//!
//! - **Catalog**: the fixed menu of purchasable items
//! - **Cart**: cart lines, quantities, and derived totals
//! - **Checkout**: contact details, validation, confirmation, and the
//!   hand-off of placed orders to an [`OrderNotifier`](checkout::OrderNotifier)
//! - **Session**: one customer's catalog, cart, form and checkout flow
//!
//! # Example
//!
//! ```rust,ignore
//! use food_commerce::prelude::*;
//!
//! let flow = CheckoutFlow::new(Arc::new(LogNotifier));
//! let mut session = OrderSession::new(Catalog::default(), flow);
//!
//! session.add_to_cart(ItemId::new(1))?;
//! session.set_contact_field(ContactField::Name, "Asha");
//! // ...
//!
//! let totals = session.totals()?;
//! println!("{} items, {}", totals.total_quantity, totals.total_cost);
//!
//! let submission = session.submit(&mut |summary: &OrderSummary<'_>| {
//!     println!("{summary}");
//!     true
//! }).await?;
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod session;

pub use error::CommerceError;
pub use ids::ItemId;
pub use money::{Currency, Money};
pub use session::OrderSession;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ItemId;
    pub use crate::money::{Currency, Money};
    pub use crate::session::OrderSession;

    // Catalog
    pub use crate::catalog::{Catalog, CatalogItem};

    // Cart
    pub use crate::cart::{Cart, CartLine, CartTotals};

    // Checkout
    pub use crate::checkout::{
        CheckoutError, CheckoutFlow, Confirm, ContactDetails, ContactField,
        Dispatch, DispatchError, DispatchHandle, LogNotifier, Notice, NoticeLevel, OrderNotifier,
        OrderSnapshot, OrderSummary, ResetPolicy, Submission, ValidationError,
    };
}
