//! Outcome of a successful account operation.

use bankline_core::{AccountNumber, Money};

use crate::event::AccountEvent;
use crate::transaction::{TransactionKind, TransactionRecord};

/// What an accepted command did to an account.
///
/// Carries the applied events, the transaction entries they logged (possibly none, e.g.
/// for an overdraft limit change) and the balance afterwards. Presentation is left to
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    account_number: AccountNumber,
    events: Vec<AccountEvent>,
    entries: Vec<TransactionRecord>,
    balance: Money,
}

impl Receipt {
    pub fn new(
        account_number: AccountNumber,
        events: Vec<AccountEvent>,
        entries: Vec<TransactionRecord>,
        balance: Money,
    ) -> Self {
        Self {
            account_number,
            events,
            entries,
            balance,
        }
    }

    pub fn account_number(&self) -> &AccountNumber {
        &self.account_number
    }

    pub fn events(&self) -> &[AccountEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<AccountEvent> {
        self.events
    }

    /// Transaction entries appended by this operation, in order.
    pub fn entries(&self) -> &[TransactionRecord] {
        &self.entries
    }

    /// Balance right after the operation.
    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn in_overdraft(&self) -> bool {
        self.balance.is_negative()
    }

    /// Amount of the first entry of `kind`, if this operation logged one.
    pub fn amount_of(&self, kind: TransactionKind) -> Option<Money> {
        self.entries.iter().find(|e| e.kind == kind).map(|e| e.amount)
    }

    pub fn fee_charged(&self) -> Option<Money> {
        self.amount_of(TransactionKind::Fee)
    }

    /// New overdraft limit, when this operation changed it.
    pub fn overdraft_limit(&self) -> Option<Money> {
        self.events.iter().find_map(|e| match e {
            AccountEvent::OverdraftLimitChanged(changed) => Some(changed.new_limit),
            _ => None,
        })
    }
}
