//! Checking behaviour: fee-bearing withdrawals within an overdraft limit.

use chrono::Utc;
use rust_decimal::Decimal;

use bankline_core::{AccountNumber, Money};

use crate::account::{Account, AccountKind};
use crate::command::{AccountCommand, OpenAccount, SetOverdraftLimit, Withdraw};
use crate::error::{AccountError, Operation};
use crate::event::{AccountEvent, FeeCharged, FundsWithdrawn, OverdraftLimitChanged};
use crate::receipt::Receipt;

/// Flat fee charged on every successful checking withdrawal (1.50).
pub const TRANSACTION_FEE: Money = Money::new(Decimal::from_parts(15, 0, 0, false, 1));

/// Checking accounts need a non-negative limit and may open overdrawn only within it.
pub(crate) fn validate_opening(initial_balance: Money, overdraft_limit: Money) -> Result<(), AccountError> {
    if overdraft_limit.is_negative() {
        return Err(AccountError::NegativeOverdraftLimit {
            limit: overdraft_limit,
        });
    }
    if initial_balance < -overdraft_limit {
        return Err(AccountError::InvalidOpeningBalance {
            balance: initial_balance,
        });
    }
    Ok(())
}

impl Account {
    pub fn open_checking(
        number: AccountNumber,
        customer_name: impl Into<String>,
        initial_balance: Money,
        overdraft_limit: Money,
    ) -> Result<Self, AccountError> {
        Self::open(OpenAccount {
            account_number: number,
            customer_name: customer_name.into(),
            initial_balance,
            kind: AccountKind::Checking { overdraft_limit },
            occurred_at: Utc::now(),
        })
    }

    /// `Some(limit)` for checking accounts.
    pub fn overdraft_limit(&self) -> Option<Money> {
        match self.kind() {
            AccountKind::Checking { overdraft_limit } => Some(overdraft_limit),
            AccountKind::Savings { .. } => None,
        }
    }

    pub fn set_overdraft_limit(&mut self, limit: Money) -> Result<Receipt, AccountError> {
        let number = self.account_number().clone();
        self.submit(AccountCommand::set_overdraft_limit(number, limit))
    }

    /// Withdraw `amount` plus `TRANSACTION_FEE`, as long as the total stays within
    /// `balance + overdraft_limit`. Emits the withdrawal, then the fee.
    pub(crate) fn handle_checking_withdraw(
        &self,
        cmd: &Withdraw,
        overdraft_limit: Money,
    ) -> Result<Vec<AccountEvent>, AccountError> {
        self.ensure_open(&cmd.account_number)?;
        Self::ensure_positive(Operation::Withdraw, cmd.amount)?;

        let total_deduction = cmd
            .amount
            .checked_add(TRANSACTION_FEE)
            .ok_or_else(|| Self::out_of_range(Operation::Withdraw))?;
        let available = self
            .balance()
            .checked_add(overdraft_limit)
            .ok_or_else(|| Self::out_of_range(Operation::Withdraw))?;
        if total_deduction > available {
            return Err(AccountError::OverdraftLimitExceeded {
                requested: total_deduction,
                available,
            });
        }

        Ok(vec![
            AccountEvent::FundsWithdrawn(FundsWithdrawn {
                account_number: cmd.account_number.clone(),
                amount: cmd.amount,
                occurred_at: cmd.occurred_at,
            }),
            AccountEvent::FeeCharged(FeeCharged {
                account_number: cmd.account_number.clone(),
                amount: TRANSACTION_FEE,
                occurred_at: cmd.occurred_at,
            }),
        ])
    }

    pub(crate) fn handle_set_overdraft_limit(
        &self,
        cmd: &SetOverdraftLimit,
    ) -> Result<Vec<AccountEvent>, AccountError> {
        self.ensure_open(&cmd.account_number)?;

        let Some(previous_limit) = self.overdraft_limit() else {
            return Err(AccountError::UnsupportedOperation {
                operation: Operation::SetOverdraftLimit,
                account_type: self.account_type(),
            });
        };

        if cmd.limit.is_negative() {
            return Err(AccountError::NegativeOverdraftLimit { limit: cmd.limit });
        }

        Ok(vec![AccountEvent::OverdraftLimitChanged(OverdraftLimitChanged {
            account_number: cmd.account_number.clone(),
            previous_limit,
            new_limit: cmd.limit,
            occurred_at: cmd.occurred_at,
        })])
    }
}
