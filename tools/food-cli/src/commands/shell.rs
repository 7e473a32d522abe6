//! Interactive ordering shell.

use std::io;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context as _, Result};
use dialoguer::Input;
use food_commerce::checkout::{ContactField, Dispatch, DispatchHandle, Notice, ResetPolicy};
use food_commerce::{ItemId, OrderSession};

use super::ShellArgs;
use crate::context::Context;
use crate::output::Output;
use crate::prompt::PromptConfirm;

const HELP: &str = "\
Commands:
  menu                  Show the menu
  add <id>              Add one unit of a menu item
  inc <id>              Add one more unit of an item already in the cart
  rm <id>               Remove an item from the cart
  cart                  Show the cart and totals
  set <field> <value>   Fill a checkout field (name, address, phone, email)
  form                  Show the checkout form
  checkout              Place the order
  theme                 Toggle dark mode (colored output)
  help                  Show this help
  quit                  Leave the shell";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Menu,
    Add(ItemId),
    Increment(ItemId),
    Remove(ItemId),
    Cart,
    Set(ContactField, String),
    Form,
    Checkout,
    Theme,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let item_id = || -> Result<ItemId> {
            if rest.is_empty() {
                bail!("`{}` needs an item id", verb);
            }
            rest.parse()
                .map_err(|_| anyhow!("`{}` is not an item id", rest))
        };

        let command = match verb.to_lowercase().as_str() {
            "menu" | "m" => ShellCommand::Menu,
            "add" | "a" => ShellCommand::Add(item_id()?),
            "inc" | "increment" | "+" => ShellCommand::Increment(item_id()?),
            "rm" | "remove" | "delete" => ShellCommand::Remove(item_id()?),
            "cart" | "c" => ShellCommand::Cart,
            "set" => {
                let (field, value) = match rest.split_once(char::is_whitespace) {
                    Some((field, value)) => (field, value.trim()),
                    None => (rest, ""),
                };
                if field.is_empty() {
                    bail!("`set` needs a field: name, address, phone or email");
                }
                ShellCommand::Set(field.parse()?, value.to_string())
            }
            "form" => ShellCommand::Form,
            "checkout" | "order" => ShellCommand::Checkout,
            "theme" | "dark" => ShellCommand::Theme,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" | "q" => ShellCommand::Quit,
            other => bail!("Unknown command `{}`. Type `help` for commands.", other),
        };

        Ok(command)
    }
}

/// Run the shell command.
///
/// Orders still being sent are awaited before returning, whether the shell
/// ends with `quit`, end of input, or an error.
pub async fn run(args: ShellArgs, ctx: &Context) -> Result<()> {
    let policy = args.await_ack.then_some(ResetPolicy::AwaitAcknowledgement);
    let mut session = ctx.session(args.dry_run, policy)?;
    let mut pending: Vec<DispatchHandle> = Vec::new();

    ctx.output.header("Cuddalore Fish Ordering");
    ctx.output.catalog(session.catalog());
    ctx.output.info("Type `help` for commands.");

    let result = repl(&mut session, &mut pending, ctx).await;
    drain_pending(&mut pending, &ctx.output).await;
    result
}

async fn repl(
    session: &mut OrderSession,
    pending: &mut Vec<DispatchHandle>,
    ctx: &Context,
) -> Result<()> {
    loop {
        report_finished(pending, &ctx.output).await;

        let prompt = tokio::task::spawn_blocking(|| {
            Input::<String>::new()
                .with_prompt("food")
                .allow_empty(true)
                .interact_text()
        })
        .await
        .context("Prompt task failed")?;

        let line = match prompt {
            Ok(line) => line,
            Err(e) if is_end_of_input(&e) => break,
            Err(e) => return Err(e.into()),
        };

        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(e) => {
                ctx.output.warn(&e.to_string());
                continue;
            }
        };

        if command == ShellCommand::Quit {
            break;
        }
        execute(command, session, pending, ctx).await?;
    }

    Ok(())
}

/// End of input at the prompt ends the shell like `quit`.
fn is_end_of_input(e: &dialoguer::Error) -> bool {
    matches!(
        e,
        dialoguer::Error::IO(err)
            if matches!(err.kind(), io::ErrorKind::UnexpectedEof | io::ErrorKind::Interrupted)
    )
}

async fn execute(
    command: ShellCommand,
    session: &mut OrderSession,
    pending: &mut Vec<DispatchHandle>,
    ctx: &Context,
) -> Result<()> {
    let output = &ctx.output;

    match command {
        ShellCommand::Menu => output.catalog(session.catalog()),
        ShellCommand::Add(id) => match session.add_to_cart(id) {
            Ok(line) => output.success(&format!("{} in cart: {}", line.name, line.quantity)),
            Err(e) => output.warn(&e.to_string()),
        },
        ShellCommand::Increment(id) => {
            if session.increment_quantity(id) {
                if let Some(line) = session.cart().get(id) {
                    output.success(&format!("{} in cart: {}", line.name, line.quantity));
                }
            } else {
                output.warn(&format!("Item {} is not in the cart; use `add {}`", id, id));
            }
        }
        ShellCommand::Remove(id) => {
            if session.remove_from_cart(id) {
                output.success(&format!("Removed item {}", id));
            } else {
                output.warn(&format!("Item {} is not in the cart", id));
            }
        }
        ShellCommand::Cart => {
            output.header("Cart");
            output.cart(session.cart(), &session.totals()?);
        }
        ShellCommand::Set(field, value) => {
            session.set_contact_field(field, value);
            output.debug(&format!("{} updated", field.label()));
        }
        ShellCommand::Form => show_form(session, output),
        ShellCommand::Checkout => {
            let mut confirm = PromptConfirm::new(output.clone(), false);
            match session.submit(&mut confirm).await {
                Ok(submission) => {
                    output.notice(submission.notice());
                    match submission.dispatch {
                        Dispatch::Pending(handle) => pending.push(handle),
                        Dispatch::Acknowledged => output.notice(Notice::EmailSent),
                    }
                }
                Err(e) => {
                    if let Some(notice) = e.notice() {
                        output.notice(notice);
                        output.debug(&e.to_string());
                    }
                }
            }
        }
        ShellCommand::Theme => {
            let dark = output.toggle_colors();
            output.info(if dark { "Dark mode on" } else { "Dark mode off" });
        }
        ShellCommand::Help => output.text(HELP),
        ShellCommand::Quit => {}
    }

    Ok(())
}

fn show_form(session: &OrderSession, output: &Output) {
    output.header("Checkout");
    for field in ContactField::ALL {
        let value = session.contact().get(field);
        let shown = if value.trim().is_empty() { "(empty)" } else { value };
        output.kv(field.label(), shown);
    }
}

/// Print notices for dispatches that finished since the last prompt.
async fn report_finished(pending: &mut Vec<DispatchHandle>, output: &Output) {
    let (done, running): (Vec<_>, Vec<_>) = pending.drain(..).partition(|h| h.is_finished());
    *pending = running;

    for handle in done {
        let outcome = handle.outcome().await;
        if let Err(e) = &outcome {
            output.debug(&e.to_string());
        }
        output.notice(Notice::for_dispatch(&outcome));
    }
}

/// Wait for every outstanding dispatch and print its notice.
async fn drain_pending(pending: &mut Vec<DispatchHandle>, output: &Output) -> Vec<Notice> {
    if pending.is_empty() {
        return Vec::new();
    }

    let spinner = output.spinner("Waiting for order emails...");
    let mut notices = Vec::with_capacity(pending.len());
    for handle in pending.drain(..) {
        let outcome = handle.outcome().await;
        if let Err(e) = &outcome {
            output.debug(&e.to_string());
        }
        notices.push(Notice::for_dispatch(&outcome));
    }
    spinner.finish_and_clear();

    for notice in &notices {
        output.notice(*notice);
    }
    notices
}
