//! Bank account domain module (event-sourced).
//!
//! Savings and checking accounts share one aggregate, `Account`, whose variant lives in
//! `AccountKind`. Pure domain logic only: no IO, no printing, no storage.

pub mod account;
pub mod checking;
pub mod command;
pub mod error;
pub mod event;
pub mod receipt;
pub mod savings;
pub mod statement;
pub mod transaction;

pub use account::{Account, AccountKind, AccountType};
pub use checking::TRANSACTION_FEE;
pub use command::{
    AccountCommand, ApplyInterest, Deposit, OpenAccount, SetOverdraftLimit, Withdraw,
};
pub use error::{AccountError, Operation};
pub use event::{
    AccountEvent, AccountOpened, FeeCharged, FundsDeposited, FundsWithdrawn, InterestApplied,
    OverdraftLimitChanged,
};
pub use receipt::Receipt;
pub use statement::{AccountStatement, StatementDetails};
pub use transaction::{TransactionKind, TransactionRecord};
