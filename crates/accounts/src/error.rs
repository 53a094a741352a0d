//! Account rejections.

use thiserror::Error;

use bankline_core::{AccountNumber, DomainError, Money};
use rust_decimal::Decimal;

use crate::account::AccountType;

/// Operation being attempted when an account rejected a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Deposit,
    Withdraw,
    ApplyInterest,
    SetOverdraftLimit,
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Operation::Deposit => "deposit",
            Operation::Withdraw => "withdrawal",
            Operation::ApplyInterest => "interest",
            Operation::SetOverdraftLimit => "overdraft limit",
        };
        f.write_str(label)
    }
}

/// Why an account refused a command.
///
/// Every variant is a validation rejection: the account is left exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("{operation} amount must be positive (got {amount})")]
    NonPositiveAmount { operation: Operation, amount: Money },

    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Money, available: Money },

    #[error("insufficient funds, overdraft limit exceeded: requested {requested}, available {available}")]
    OverdraftLimitExceeded { requested: Money, available: Money },

    #[error("overdraft limit cannot be negative (got {limit})")]
    NegativeOverdraftLimit { limit: Money },

    #[error("interest rate cannot be negative (got {rate})")]
    NegativeInterestRate { rate: Decimal },

    #[error("opening balance {balance} is not allowed for this account")]
    InvalidOpeningBalance { balance: Money },

    #[error("{operation} is not supported by a {account_type}")]
    UnsupportedOperation {
        operation: Operation,
        account_type: AccountType,
    },

    #[error("command targets account {found}, but this is account {expected}")]
    AccountNumberMismatch {
        expected: AccountNumber,
        found: AccountNumber,
    },

    #[error("account has not been opened")]
    NotOpened,

    #[error("account is already open")]
    AlreadyOpened,

    #[error(transparent)]
    Domain(#[from] DomainError),
}
