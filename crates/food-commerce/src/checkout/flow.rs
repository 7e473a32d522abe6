//! Checkout flow state machine.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;

use crate::cart::Cart;
use crate::checkout::{
    ContactDetails, ContactField, DispatchError, DispatchHandle, Notice, OrderNotifier,
    OrderSnapshot, OrderSummary,
};

/// Where the checkout flow is.
///
/// `submit` holds the flow mutably for the whole attempt, so `Submitting`
/// is only ever seen from inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum CheckoutState {
    /// The customer is filling the cart and form.
    Editing,
    /// An order has been confirmed and is being handed off.
    Submitting,
}

/// When the cart and form are reset after a confirmed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Reset as soon as the order is dispatched. The dispatch outcome only
    /// produces a follow-up notice and never restores the cart.
    #[default]
    Optimistic,
    /// Wait for the notifier; reset only if it accepted the order.
    AwaitAcknowledgement,
}

impl ResetPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResetPolicy::Optimistic => "optimistic",
            ResetPolicy::AwaitAcknowledgement => "await_acknowledgement",
        }
    }
}

/// Asks the customer to confirm an order before it is placed.
pub trait Confirm {
    fn confirm(&mut self, summary: &OrderSummary<'_>) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&OrderSummary<'_>) -> bool,
{
    fn confirm(&mut self, summary: &OrderSummary<'_>) -> bool {
        self(summary)
    }
}

/// The order is not ready to submit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field: {}", join_fields(.0))]
    MissingFields(Vec<ContactField>),

    #[error("empty cart")]
    EmptyCart,
}

fn join_fields(fields: &[ContactField]) -> String {
    fields
        .iter()
        .map(ContactField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Why a submit attempt did not place an order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Order cancelled at confirmation")]
    UserCancelled,

    /// The notifier refused the order under
    /// [`ResetPolicy::AwaitAcknowledgement`], or no tokio runtime was
    /// available to dispatch it. The cart and form are left as they were.
    #[error("Order dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),
}

/// How far the hand-off got when `submit` returned.
#[derive(Debug)]
pub enum Dispatch {
    /// Still running in the background.
    Pending(DispatchHandle),
    /// The notifier already accepted the order.
    Acknowledged,
}

/// A placed order.
#[derive(Debug)]
pub struct Submission {
    /// Cart and contact details as they were before the reset.
    pub snapshot: OrderSnapshot,
    pub placed_at: DateTime<Utc>,
    pub dispatch: Dispatch,
}

impl Submission {
    pub fn notice(&self) -> Notice {
        Notice::Submitted
    }
}

/// Validates, confirms, dispatches and resets.
pub struct CheckoutFlow {
    state: CheckoutState,
    policy: ResetPolicy,
    notifier: Arc<dyn OrderNotifier>,
}

impl CheckoutFlow {
    /// Create a flow using the optimistic reset policy.
    pub fn new(notifier: Arc<dyn OrderNotifier>) -> Self {
        Self {
            state: CheckoutState::Editing,
            policy: ResetPolicy::default(),
            notifier,
        }
    }

    pub fn with_policy(mut self, policy: ResetPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub(crate) fn state(&self) -> CheckoutState {
        self.state
    }

    pub fn policy(&self) -> ResetPolicy {
        self.policy
    }

    /// Check that the order can be submitted.
    ///
    /// Contact fields are checked before the cart, so a blank form with an
    /// empty cart reports the missing fields.
    pub fn validate(cart: &Cart, contact: &ContactDetails) -> Result<(), ValidationError> {
        let missing = contact.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }
        if cart.is_empty() {
            return Err(ValidationError::EmptyCart);
        }
        Ok(())
    }

    /// Submit the current cart and contact details.
    ///
    /// Nothing is mutated unless the order is confirmed. Under the
    /// optimistic policy the dispatch is spawned on the current tokio
    /// runtime and the cart and form are cleared before it completes. When
    /// there is no current runtime the attempt fails with
    /// [`DispatchError::Aborted`] and nothing is reset.
    pub async fn submit<C>(
        &mut self,
        cart: &mut Cart,
        contact: &mut ContactDetails,
        confirm: &mut C,
    ) -> Result<Submission, CheckoutError>
    where
        C: Confirm + ?Sized,
    {
        tracing::debug!(state = ?self.state(), policy = self.policy.as_str(), "checkout started");

        if let Err(e) = Self::validate(cart, contact) {
            tracing::debug!(error = %e, "checkout rejected");
            return Err(e.into());
        }

        let snapshot = OrderSnapshot::capture(cart, contact);
        if !confirm.confirm(&snapshot.summary()) {
            tracing::debug!("checkout declined at confirmation");
            return Err(CheckoutError::UserCancelled);
        }

        self.state = CheckoutState::Submitting;
        let placed_at = Utc::now();

        let dispatch = match self.policy {
            ResetPolicy::Optimistic => match self.spawn_dispatch(snapshot.clone()) {
                Ok(handle) => Dispatch::Pending(handle),
                Err(e) => {
                    self.state = CheckoutState::Editing;
                    tracing::warn!(error = %e, "order dispatch could not start, cart kept");
                    return Err(e.into());
                }
            },
            ResetPolicy::AwaitAcknowledgement => {
                if let Err(e) = self.notifier.notify(&snapshot).await {
                    self.state = CheckoutState::Editing;
                    tracing::warn!(error = %e, "order dispatch failed, cart kept");
                    return Err(e.into());
                }
                Dispatch::Acknowledged
            }
        };

        cart.clear();
        contact.clear();
        self.state = CheckoutState::Editing;

        tracing::info!(
            lines = snapshot.cart_items.len(),
            policy = self.policy.as_str(),
            "order submitted"
        );

        Ok(Submission {
            snapshot,
            placed_at,
            dispatch,
        })
    }

    fn spawn_dispatch(&self, snapshot: OrderSnapshot) -> Result<DispatchHandle, DispatchError> {
        let runtime = Handle::try_current().map_err(|e| DispatchError::Aborted(e.to_string()))?;
        let notifier = Arc::clone(&self.notifier);
        Ok(DispatchHandle::new(runtime.spawn(async move {
            let result = notifier.notify(&snapshot).await;
            match &result {
                Ok(()) => tracing::info!("order email sent"),
                Err(e) => tracing::warn!(error = %e, "order email failed"),
            }
            result
        })))
    }
}

impl fmt::Debug for CheckoutFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutFlow")
            .field("state", &self.state)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogItem;
    use crate::money::{Currency, Money};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<OrderSnapshot>>,
        fail: bool,
    }

    #[async_trait]
    impl OrderNotifier for Recorder {
        async fn notify(&self, order: &OrderSnapshot) -> Result<(), DispatchError> {
            self.sent.lock().unwrap().push(order.clone());
            if self.fail {
                Err(DispatchError::Http {
                    status: 500,
                    url: "http://localhost:2000/email".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    /// Holds every dispatch until released.
    struct Gate {
        release: Mutex<Option<oneshot::Receiver<()>>>,
    }

    #[async_trait]
    impl OrderNotifier for Gate {
        async fn notify(&self, _order: &OrderSnapshot) -> Result<(), DispatchError> {
            let rx = self.release.lock().unwrap().take();
            if let Some(rx) = rx {
                let _ = rx.await;
            }
            Ok(())
        }
    }

    fn filled() -> (Cart, ContactDetails) {
        let mut cart = Cart::new();
        cart.add_to_cart(&CatalogItem::new(1, "Strawberry", Money::from_major(15, Currency::USD)));
        let contact = ContactDetails::new("Asha", "12 Beach Rd", "98400", "asha@example.com");
        (cart, contact)
    }

    fn yes(_: &OrderSummary<'_>) -> bool {
        true
    }

    #[tokio::test]
    async fn test_blank_field_rejected_without_changes() {
        let recorder = Arc::new(Recorder::default());
        let mut flow = CheckoutFlow::new(recorder.clone());

        for field in ContactField::ALL {
            let (mut cart, mut contact) = filled();
            contact.set(field, "   ");
            let (cart_before, contact_before) = (cart.clone(), contact.clone());
            let mut asked = false;
            let mut confirm = |_: &OrderSummary<'_>| {
                asked = true;
                true
            };

            let err = flow.submit(&mut cart, &mut contact, &mut confirm).await.unwrap_err();

            assert_eq!(
                err,
                CheckoutError::Validation(ValidationError::MissingFields(vec![field]))
            );
            assert!(!asked);
            assert_eq!(cart, cart_before);
            assert_eq!(contact, contact_before);
            assert_eq!(flow.state(), CheckoutState::Editing);
        }
        assert!(recorder.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let mut flow = CheckoutFlow::new(Arc::new(Recorder::default()));
        let (_, mut contact) = filled();
        let mut cart = Cart::new();

        let err = flow.submit(&mut cart, &mut contact, &mut yes).await.unwrap_err();

        assert_eq!(err, CheckoutError::Validation(ValidationError::EmptyCart));
        assert!(contact.is_complete());
    }

    #[test]
    fn test_missing_fields_reported_before_empty_cart() {
        let cart = Cart::new();
        let contact = ContactDetails::default();
        assert_eq!(
            CheckoutFlow::validate(&cart, &contact),
            Err(ValidationError::MissingFields(ContactField::ALL.to_vec()))
        );
    }

    #[tokio::test]
    async fn test_declined_confirmation_is_silent() {
        let recorder = Arc::new(Recorder::default());
        let mut flow = CheckoutFlow::new(recorder.clone());
        let (mut cart, mut contact) = filled();
        let mut no = |_: &OrderSummary<'_>| false;

        let err = flow.submit(&mut cart, &mut contact, &mut no).await.unwrap_err();

        assert_eq!(err, CheckoutError::UserCancelled);
        assert_eq!(err.notice(), None);
        assert_eq!(cart.len(), 1);
        assert!(contact.is_complete());
        assert!(recorder.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_confirmed_order_sends_one_snapshot_and_resets() {
        let recorder = Arc::new(Recorder::default());
        let mut flow = CheckoutFlow::new(recorder.clone());
        let (mut cart, mut contact) = filled();
        let expected = OrderSnapshot::capture(&cart, &contact);

        let submission = flow.submit(&mut cart, &mut contact, &mut yes).await.unwrap();

        assert!(cart.is_empty());
        assert_eq!(contact, ContactDetails::default());
        assert_eq!(submission.snapshot, expected);
        assert_eq!(submission.notice(), Notice::Submitted);

        let Dispatch::Pending(handle) = submission.dispatch else {
            panic!("optimistic submit should dispatch in the background");
        };
        assert_eq!(handle.outcome().await, Ok(()));
        assert_eq!(*recorder.sent.lock().unwrap(), vec![expected]);
    }

    #[tokio::test]
    async fn test_optimistic_reset_does_not_wait_for_dispatch() {
        let (tx, rx) = oneshot::channel();
        let gate = Arc::new(Gate {
            release: Mutex::new(Some(rx)),
        });
        let mut flow = CheckoutFlow::new(gate);
        let (mut cart, mut contact) = filled();

        let submission = flow.submit(&mut cart, &mut contact, &mut yes).await.unwrap();
        assert!(cart.is_empty());
        assert!(contact.name.is_empty());

        let Dispatch::Pending(handle) = submission.dispatch else {
            panic!("expected a pending dispatch");
        };
        assert!(!handle.is_finished());
        tx.send(()).unwrap();
        assert_eq!(handle.outcome().await, Ok(()));
    }

    #[tokio::test]
    async fn test_optimistic_failure_does_not_roll_back() {
        let recorder = Arc::new(Recorder {
            fail: true,
            ..Default::default()
        });
        let mut flow = CheckoutFlow::new(recorder);
        let (mut cart, mut contact) = filled();

        let submission = flow.submit(&mut cart, &mut contact, &mut yes).await.unwrap();
        let Dispatch::Pending(handle) = submission.dispatch else {
            panic!("expected a pending dispatch");
        };
        let outcome = handle.outcome().await;

        assert_eq!(Notice::for_dispatch(&outcome), Notice::EmailFailed);
        assert!(cart.is_empty());
        assert_eq!(contact, ContactDetails::default());
        assert_eq!(flow.state(), CheckoutState::Editing);
    }

    #[tokio::test]
    async fn test_await_ack_keeps_cart_on_failure() {
        let recorder = Arc::new(Recorder {
            fail: true,
            ..Default::default()
        });
        let mut flow =
            CheckoutFlow::new(recorder.clone()).with_policy(ResetPolicy::AwaitAcknowledgement);
        let (mut cart, mut contact) = filled();

        let err = flow.submit(&mut cart, &mut contact, &mut yes).await.unwrap_err();

        assert!(matches!(err, CheckoutError::Dispatch(DispatchError::Http { status: 500, .. })));
        assert_eq!(err.notice(), Some(Notice::EmailFailed));
        assert_eq!(cart.len(), 1);
        assert!(contact.is_complete());
        assert_eq!(flow.state(), CheckoutState::Editing);
        assert_eq!(recorder.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_await_ack_resets_on_success() {
        let mut flow = CheckoutFlow::new(Arc::new(Recorder::default()))
            .with_policy(ResetPolicy::AwaitAcknowledgement);
        let (mut cart, mut contact) = filled();

        let submission = flow.submit(&mut cart, &mut contact, &mut yes).await.unwrap();

        assert!(matches!(submission.dispatch, Dispatch::Acknowledged));
        assert!(cart.is_empty());
        assert_eq!(contact, ContactDetails::default());
    }

    #[test]
    fn test_dispatch_without_runtime_is_aborted() {
        let flow = CheckoutFlow::new(Arc::new(Recorder::default()));
        let (cart, contact) = filled();

        let err = flow
            .spawn_dispatch(OrderSnapshot::capture(&cart, &contact))
            .unwrap_err();

        assert!(matches!(err, DispatchError::Aborted(_)));
        assert_eq!(
            CheckoutError::from(err).notice(),
            Some(Notice::EmailFailed)
        );
    }

    #[tokio::test]
    async fn test_state_is_editing_between_attempts() {
        let mut flow = CheckoutFlow::new(Arc::new(Recorder::default()));
        assert_eq!(flow.state(), CheckoutState::Editing);

        let (mut cart, mut contact) = filled();
        let submission = flow.submit(&mut cart, &mut contact, &mut yes).await.unwrap();
        assert_eq!(flow.state(), CheckoutState::Editing);

        let err = flow.submit(&mut cart, &mut contact, &mut yes).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Validation(_)));
        assert_eq!(flow.state(), CheckoutState::Editing);

        if let Dispatch::Pending(handle) = submission.dispatch {
            assert_eq!(handle.outcome().await, Ok(()));
        }
    }

    #[test]
    fn test_validation_message() {
        let err = ValidationError::MissingFields(vec![ContactField::Name, ContactField::Email]);
        assert_eq!(err.to_string(), "missing required field: name, email");
        assert_eq!(ValidationError::EmptyCart.to_string(), "empty cart");
    }
}
