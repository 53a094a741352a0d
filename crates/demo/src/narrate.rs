//! Human-readable narration of receipts and rejections.

use bankline_accounts::{AccountError, AccountEvent, Operation, Receipt};

/// Lines describing what an accepted command did.
pub fn receipt(receipt: &Receipt) -> Vec<String> {
    let balance = receipt.balance();
    let checking_withdrawal = receipt.fee_charged().is_some();

    let mut lines: Vec<String> = receipt
        .events()
        .iter()
        .map(|event| match event {
            AccountEvent::AccountOpened(e) => format!(
                "Opened {} {} for {} with ${}",
                e.kind.account_type(),
                e.account_number,
                e.customer_name,
                e.initial_balance
            ),
            AccountEvent::FundsDeposited(e) => {
                format!("Deposited ${}. New balance: ${balance}", e.amount)
            }
            AccountEvent::FundsWithdrawn(e) if checking_withdrawal => {
                format!("Withdrew ${} from checking account", e.amount)
            }
            AccountEvent::FundsWithdrawn(e) => {
                format!("Withdrew ${}. New balance: ${balance}", e.amount)
            }
            AccountEvent::FeeCharged(e) => format!("Transaction fee: ${}", e.amount),
            AccountEvent::InterestApplied(e) => {
                format!("Interest applied: ${}. New balance: ${balance}", e.amount)
            }
            AccountEvent::OverdraftLimitChanged(e) => {
                format!("Overdraft limit updated to ${:.1}", e.new_limit)
            }
        })
        .collect();

    if checking_withdrawal && receipt.in_overdraft() {
        lines.push(format!("Account is in overdraft. Current balance: ${balance}"));
    }

    lines
}

/// One line explaining why a command was refused.
pub fn rejection(error: &AccountError) -> String {
    match error {
        AccountError::NonPositiveAmount {
            operation: Operation::Deposit,
            ..
        } => "Deposit amount must be positive.".to_string(),
        AccountError::NonPositiveAmount {
            operation: Operation::Withdraw,
            ..
        } => "Withdrawal amount must be positive.".to_string(),
        AccountError::InsufficientFunds { .. } => "Insufficient funds.".to_string(),
        AccountError::OverdraftLimitExceeded { .. } => {
            "Insufficient funds. Overdraft limit exceeded.".to_string()
        }
        AccountError::NegativeOverdraftLimit { .. } => {
            "Overdraft limit cannot be negative.".to_string()
        }
        other => format!("Operation rejected: {other}."),
    }
}
