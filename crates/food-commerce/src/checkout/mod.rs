//! Checkout module.
//!
//! Contact details, order snapshots, the notification seam, and the
//! checkout flow that ties them together.

mod contact;
mod flow;
mod notice;
mod notify;
mod order;

pub use contact::{ContactDetails, ContactField, ParseFieldError};
pub use flow::{
    CheckoutError, CheckoutFlow, Confirm, Dispatch, ResetPolicy, Submission,
    ValidationError,
};
pub use notice::{Notice, NoticeLevel};
pub use notify::{DispatchError, DispatchHandle, LogNotifier, OrderNotifier};
pub use order::{OrderPayload, OrderSnapshot, OrderSummary};
