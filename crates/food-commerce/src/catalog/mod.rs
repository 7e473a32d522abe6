//! Product catalog module.
//!
//! The catalog is fixed for the lifetime of a session: it is built once,
//! either from the default menu or from configuration, and never mutated.

mod item;
mod menu;

pub use item::CatalogItem;
pub use menu::{default_menu, Catalog};
