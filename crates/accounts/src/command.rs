//! Account commands (intent).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bankline_core::{AccountNumber, Money};
use bankline_events::Command;

use crate::account::AccountKind;

/// Command: OpenAccount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAccount {
    pub account_number: AccountNumber,
    pub customer_name: String,
    pub initial_balance: Money,
    pub kind: AccountKind,
    pub occurred_at: DateTime<Utc>,
}

/// Command: Deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub account_number: AccountNumber,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Command: Withdraw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdraw {
    pub account_number: AccountNumber,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ApplyInterest (savings only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyInterest {
    pub account_number: AccountNumber,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SetOverdraftLimit (checking only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetOverdraftLimit {
    pub account_number: AccountNumber,
    pub limit: Money,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountCommand {
    Open(OpenAccount),
    Deposit(Deposit),
    Withdraw(Withdraw),
    ApplyInterest(ApplyInterest),
    SetOverdraftLimit(SetOverdraftLimit),
}

impl AccountCommand {
    pub fn deposit(account_number: AccountNumber, amount: Money) -> Self {
        Self::Deposit(Deposit {
            account_number,
            amount,
            occurred_at: Utc::now(),
        })
    }

    pub fn withdraw(account_number: AccountNumber, amount: Money) -> Self {
        Self::Withdraw(Withdraw {
            account_number,
            amount,
            occurred_at: Utc::now(),
        })
    }

    pub fn apply_interest(account_number: AccountNumber) -> Self {
        Self::ApplyInterest(ApplyInterest {
            account_number,
            occurred_at: Utc::now(),
        })
    }

    pub fn set_overdraft_limit(account_number: AccountNumber, limit: Money) -> Self {
        Self::SetOverdraftLimit(SetOverdraftLimit {
            account_number,
            limit,
            occurred_at: Utc::now(),
        })
    }
}

impl Command for AccountCommand {
    fn target_account(&self) -> &AccountNumber {
        match self {
            AccountCommand::Open(cmd) => &cmd.account_number,
            AccountCommand::Deposit(cmd) => &cmd.account_number,
            AccountCommand::Withdraw(cmd) => &cmd.account_number,
            AccountCommand::ApplyInterest(cmd) => &cmd.account_number,
            AccountCommand::SetOverdraftLimit(cmd) => &cmd.account_number,
        }
    }
}
