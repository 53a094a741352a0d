//! The demonstration run: two accounts, a handful of operations, final statements.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use rust_decimal_macros::dec;
use tracing::info;

use bankline_accounts::{AccountCommand, AccountEvent, AccountKind, OpenAccount};
use bankline_core::{AccountNumber, Money};
use bankline_events::{EventBus, EventEnvelope, InMemoryEventBus};
use bankline_infra::{AccountBook, CommandDispatcher};

pub type DemoBus = Arc<InMemoryEventBus<EventEnvelope<AccountEvent>>>;

/// What a finished run leaves behind.
#[derive(Debug)]
pub struct Outcome {
    pub book: AccountBook,
    pub published_events: usize,
}

/// Run the scenario, narrating every step to `out`.
pub fn run(out: &mut impl Write) -> anyhow::Result<Outcome> {
    let bus: DemoBus = Arc::new(InMemoryEventBus::new());
    let subscription = bus.subscribe();
    let mut dispatcher = CommandDispatcher::new(Arc::clone(&bus));

    let savings = AccountNumber::new("SA001")?;
    let checking = AccountNumber::new("CA001")?;

    writeln!(out, "=== Banking System Demo ===")?;
    writeln!(out)?;

    perform(
        &mut dispatcher,
        AccountCommand::Open(OpenAccount {
            account_number: savings.clone(),
            customer_name: "John Doe".to_string(),
            initial_balance: Money::new(dec!(1000.0)),
            kind: AccountKind::Savings {
                interest_rate: dec!(2.5),
            },
            occurred_at: Utc::now(),
        }),
        out,
    )?;
    perform(
        &mut dispatcher,
        AccountCommand::Open(OpenAccount {
            account_number: checking.clone(),
            customer_name: "Jane Smith".to_string(),
            initial_balance: Money::new(dec!(2000.0)),
            kind: AccountKind::Checking {
                overdraft_limit: Money::new(dec!(500.0)),
            },
            occurred_at: Utc::now(),
        }),
        out,
    )?;

    writeln!(out)?;
    writeln!(out, "1. Initial Account Information:")?;
    print_statements(&dispatcher, out)?;

    writeln!(out, "2. Testing Deposits:")?;
    perform(&mut dispatcher, AccountCommand::deposit(savings.clone(), Money::new(dec!(500.0))), out)?;
    perform(&mut dispatcher, AccountCommand::deposit(checking.clone(), Money::new(dec!(300.0))), out)?;
    writeln!(out)?;

    writeln!(out, "3. Testing Withdrawals:")?;
    perform(&mut dispatcher, AccountCommand::withdraw(savings.clone(), Money::new(dec!(1300.0))), out)?;
    perform(&mut dispatcher, AccountCommand::withdraw(savings.clone(), Money::new(dec!(200.0))), out)?;
    perform(&mut dispatcher, AccountCommand::withdraw(checking.clone(), Money::new(dec!(2500.0))), out)?;
    writeln!(out)?;

    writeln!(out, "4. Testing Special Features:")?;
    perform(&mut dispatcher, AccountCommand::apply_interest(savings.clone()), out)?;
    perform(
        &mut dispatcher,
        AccountCommand::set_overdraft_limit(checking.clone(), Money::new(dec!(1000.0))),
        out,
    )?;
    writeln!(out)?;

    writeln!(out, "5. Updated Account Information:")?;
    print_statements(&dispatcher, out)?;

    writeln!(out, "6. Transaction History:")?;
    for number in [&savings, &checking] {
        writeln!(out, "Account {number}:")?;
        let history = dispatcher
            .book()
            .history(number)
            .with_context(|| format!("account {number} missing from the book"))?;
        for record in history {
            writeln!(out, "  {record}")?;
        }
    }

    let published_events = subscription.drain().len();
    info!(published_events, "scenario complete");

    let (book, _bus) = dispatcher.into_parts();
    Ok(Outcome {
        book,
        published_events,
    })
}

/// Dispatch one command and narrate the result. Rejections are narrated, not propagated.
fn perform<B>(
    dispatcher: &mut CommandDispatcher<B>,
    command: AccountCommand,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    B: EventBus<EventEnvelope<AccountEvent>>,
{
    match dispatcher.dispatch(command) {
        Ok(receipt) => {
            for line in crate::narrate::receipt(&receipt) {
                writeln!(out, "{line}")?;
            }
        }
        Err(err) => match err.rejection() {
            Some(rejection) => writeln!(out, "{}", crate::narrate::rejection(rejection))?,
            None => return Err(err.into()),
        },
    }
    Ok(())
}

fn print_statements<B>(dispatcher: &CommandDispatcher<B>, out: &mut impl Write) -> anyhow::Result<()> {
    for statement in dispatcher.book().statements() {
        writeln!(out, "{statement}")?;
        writeln!(out)?;
    }
    Ok(())
}
