//! Account events (facts).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bankline_core::{AccountNumber, Money};
use bankline_events::Event;

use crate::account::AccountKind;

/// Event: AccountOpened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountOpened {
    pub account_number: AccountNumber,
    pub customer_name: String,
    pub initial_balance: Money,
    pub kind: AccountKind,
    pub occurred_at: DateTime<Utc>,
}

/// Event: FundsDeposited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundsDeposited {
    pub account_number: AccountNumber,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Event: FundsWithdrawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundsWithdrawn {
    pub account_number: AccountNumber,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Event: FeeCharged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeCharged {
    pub account_number: AccountNumber,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Event: InterestApplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestApplied {
    pub account_number: AccountNumber,
    /// Rate (percent) the interest was computed with.
    pub rate: Decimal,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OverdraftLimitChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverdraftLimitChanged {
    pub account_number: AccountNumber,
    pub previous_limit: Money,
    pub new_limit: Money,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountEvent {
    AccountOpened(AccountOpened),
    FundsDeposited(FundsDeposited),
    FundsWithdrawn(FundsWithdrawn),
    FeeCharged(FeeCharged),
    InterestApplied(InterestApplied),
    OverdraftLimitChanged(OverdraftLimitChanged),
}

impl AccountEvent {
    pub fn account_number(&self) -> &AccountNumber {
        match self {
            AccountEvent::AccountOpened(e) => &e.account_number,
            AccountEvent::FundsDeposited(e) => &e.account_number,
            AccountEvent::FundsWithdrawn(e) => &e.account_number,
            AccountEvent::FeeCharged(e) => &e.account_number,
            AccountEvent::InterestApplied(e) => &e.account_number,
            AccountEvent::OverdraftLimitChanged(e) => &e.account_number,
        }
    }
}

impl Event for AccountEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AccountEvent::AccountOpened(_) => "accounts.account.opened",
            AccountEvent::FundsDeposited(_) => "accounts.account.funds_deposited",
            AccountEvent::FundsWithdrawn(_) => "accounts.account.funds_withdrawn",
            AccountEvent::FeeCharged(_) => "accounts.account.fee_charged",
            AccountEvent::InterestApplied(_) => "accounts.account.interest_applied",
            AccountEvent::OverdraftLimitChanged(_) => "accounts.account.overdraft_limit_changed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            AccountEvent::AccountOpened(e) => e.occurred_at,
            AccountEvent::FundsDeposited(e) => e.occurred_at,
            AccountEvent::FundsWithdrawn(e) => e.occurred_at,
            AccountEvent::FeeCharged(e) => e.occurred_at,
            AccountEvent::InterestApplied(e) => e.occurred_at,
            AccountEvent::OverdraftLimitChanged(e) => e.occurred_at,
        }
    }
}
