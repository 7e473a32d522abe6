//! HTTP delivery of placed orders.
//!
//! This crate provides:
//! - `HttpNotifier` - POSTs order payloads to the email notification service
//! - `NotifyPolicy` - endpoint and request timeouts

mod client;
mod policy;

pub use client::*;
pub use policy::*;
