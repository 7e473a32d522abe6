//! Place a single order from the command line.

use anyhow::{Context as _, Result};
use food_commerce::checkout::{CheckoutError, ContactField, Dispatch, Notice, ResetPolicy};

use super::OrderArgs;
use crate::context::Context;
use crate::prompt::PromptConfirm;

/// Run the order command.
pub async fn run(args: OrderArgs, ctx: &Context) -> Result<()> {
    let policy = args.await_ack.then_some(ResetPolicy::AwaitAcknowledgement);
    let mut session = ctx.session(args.dry_run, policy)?;

    for id in &args.items {
        session.add_to_cart(*id)?;
    }
    session.set_contact_field(ContactField::Name, args.name);
    session.set_contact_field(ContactField::Address, args.address);
    session.set_contact_field(ContactField::PhoneNumber, args.phone);
    session.set_contact_field(ContactField::Email, args.email);

    ctx.output.header("Order Summary");
    ctx.output.cart(session.cart(), &session.totals()?);

    let mut confirm = PromptConfirm::new(ctx.output.clone(), args.yes);
    let submission = match session.submit(&mut confirm).await {
        Ok(submission) => submission,
        Err(CheckoutError::UserCancelled) => return Ok(()),
        Err(e) => {
            let message = e.notice().map(|n| n.message()).unwrap_or("Checkout failed");
            return Err(e).context(message);
        }
    };

    ctx.output.notice(submission.notice());

    let email = match submission.dispatch {
        Dispatch::Pending(handle) => {
            let spinner = ctx.output.spinner("Sending order email...");
            let outcome = handle.outcome().await;
            spinner.finish_and_clear();
            outcome
        }
        Dispatch::Acknowledged => Ok(()),
    };

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "placed_at": submission.placed_at.to_rfc3339(),
            "order": submission.snapshot.payload(),
            "email": Notice::for_dispatch(&email),
        }));
    }

    match email {
        Ok(()) => {
            ctx.output.notice(Notice::EmailSent);
            Ok(())
        }
        Err(e) => Err(e).context(Notice::EmailFailed.message()),
    }
}
