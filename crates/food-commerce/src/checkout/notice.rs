//! User-facing checkout notifications.

use serde::Serialize;
use std::fmt;

use crate::checkout::{CheckoutError, DispatchError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A message the front end shows after a checkout event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    MissingFields,
    EmptyCart,
    /// Shown as soon as the order is dispatched.
    Submitted,
    /// Shown later, when the notification service accepted the order.
    EmailSent,
    /// Shown later, when the notification service could not be reached.
    EmailFailed,
}

impl Notice {
    pub fn level(&self) -> NoticeLevel {
        match self {
            Notice::Submitted | Notice::EmailSent => NoticeLevel::Success,
            Notice::MissingFields | Notice::EmptyCart | Notice::EmailFailed => NoticeLevel::Error,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notice::MissingFields => "Please fill in all the required fields.",
            Notice::EmptyCart => "Please select at least one food item to place an order.",
            Notice::Submitted => {
                "Order placed. Check your email; your food will arrive within one hour."
            }
            Notice::EmailSent => "Check your email.",
            Notice::EmailFailed => "Error sending order email.",
        }
    }

    /// Notice for a finished background dispatch.
    pub fn for_dispatch(outcome: &Result<(), DispatchError>) -> Self {
        match outcome {
            Ok(()) => Notice::EmailSent,
            Err(_) => Notice::EmailFailed,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl From<&ValidationError> for Notice {
    fn from(e: &ValidationError) -> Self {
        match e {
            ValidationError::MissingFields(_) => Notice::MissingFields,
            ValidationError::EmptyCart => Notice::EmptyCart,
        }
    }
}

impl CheckoutError {
    /// The notice to show for this error, `None` when the abort is silent.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            CheckoutError::Validation(e) => Some(e.into()),
            CheckoutError::UserCancelled => None,
            CheckoutError::Dispatch(_) => Some(Notice::EmailFailed),
        }
    }
}
