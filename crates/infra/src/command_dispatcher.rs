//! Command execution pipeline (application-level orchestration).
//!
//! ```text
//! AccountCommand
//!   ↓
//! 1. Route to the target account (by account number)
//!   ↓
//! 2. Decide + apply (pure; a rejection leaves the account untouched)
//!   ↓
//! 3. Wrap each applied event in an envelope (sequence = account version)
//!   ↓
//! 4. Publish envelopes to the bus
//! ```
//!
//! The dispatcher owns its `AccountBook` outright; it is a single-caller structure.

use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use bankline_accounts::{Account, AccountCommand, AccountError, AccountEvent, OpenAccount, Receipt};
use bankline_core::{AccountNumber, AggregateRoot};
use bankline_events::{Command, EventBus, EventEnvelope};

use crate::account_book::{AccountBook, BookError};

/// Aggregate type recorded on every envelope this dispatcher publishes.
pub const AGGREGATE_TYPE: &str = "accounts.account";

#[derive(Debug, Error)]
pub enum DispatchError {
    /// No account with this number in the book.
    #[error("account {0} not found")]
    NotFound(AccountNumber),

    /// The book refused the account (duplicate number).
    #[error(transparent)]
    Book(#[from] BookError),

    /// The account rejected the command; nothing changed and nothing was published.
    #[error("command rejected: {0}")]
    Rejected(#[from] AccountError),

    /// Publication failed after the account was updated.
    #[error("event publication failed: {0}")]
    Publish(String),
}

impl DispatchError {
    /// The account-level rejection, if that is what this error is.
    pub fn rejection(&self) -> Option<&AccountError> {
        match self {
            DispatchError::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

/// Routes account commands to the accounts in its book and publishes the resulting events.
///
/// - Accounts are updated before anything is published.
/// - Each applied event becomes one `EventEnvelope` whose `sequence_number` is the account
///   version right after that event.
/// - Rejections publish nothing.
#[derive(Debug)]
pub struct CommandDispatcher<B> {
    book: AccountBook,
    bus: B,
}

impl<B> CommandDispatcher<B> {
    pub fn new(bus: B) -> Self {
        Self {
            book: AccountBook::new(),
            bus,
        }
    }

    pub fn book(&self) -> &AccountBook {
        &self.book
    }

    pub fn into_parts(self) -> (AccountBook, B) {
        (self.book, self.bus)
    }
}

impl<B> CommandDispatcher<B>
where
    B: EventBus<EventEnvelope<AccountEvent>>,
{
    /// Open a new account and add it to the book.
    pub fn open(&mut self, command: OpenAccount) -> Result<Receipt, DispatchError> {
        let number = command.account_number.clone();
        let account_type = command.kind.account_type();
        if self.book.contains(&number) {
            warn!(account = %number, "open rejected: duplicate account number");
            return Err(BookError::DuplicateAccount(number).into());
        }

        let mut account = Account::empty(number.clone());
        let receipt = account
            .submit(AccountCommand::Open(command))
            .inspect_err(|err| warn!(account = %number, error = %err, "open rejected"))?;

        self.book.insert(account)?;
        publish_receipt(&self.bus, 0, &receipt)?;

        info!(
            account = %number,
            kind = %account_type,
            balance = %receipt.balance(),
            "account opened"
        );
        Ok(receipt)
    }

    /// Dispatch any account command.
    pub fn dispatch(&mut self, command: AccountCommand) -> Result<Receipt, DispatchError> {
        if let AccountCommand::Open(open) = command {
            return self.open(open);
        }

        let number = command.target_account().clone();
        let account = self
            .book
            .get_mut(&number)
            .ok_or_else(|| DispatchError::NotFound(number.clone()))?;

        let version_before = account.version();
        let receipt = account
            .submit(command)
            .inspect_err(|err| warn!(account = %number, error = %err, "command rejected"))?;

        publish_receipt(&self.bus, version_before, &receipt)?;

        info!(
            account = %number,
            events = receipt.events().len(),
            balance = %receipt.balance(),
            overdrawn = receipt.in_overdraft(),
            "command applied"
        );
        Ok(receipt)
    }
}

fn publish_receipt<B>(bus: &B, version_before: u64, receipt: &Receipt) -> Result<(), DispatchError>
where
    B: EventBus<EventEnvelope<AccountEvent>>,
{
    for (offset, event) in receipt.events().iter().enumerate() {
        let envelope = EventEnvelope::new(
            Uuid::now_v7(),
            receipt.account_number().clone(),
            AGGREGATE_TYPE,
            version_before + offset as u64 + 1,
            event.clone(),
        );
        debug!(
            event_id = %envelope.event_id(),
            event_type = envelope.event_type(),
            sequence = envelope.sequence_number(),
            "publishing event"
        );
        bus.publish(envelope)
            .map_err(|e| DispatchError::Publish(format!("{e:?}")))?;
    }
    Ok(())
}
