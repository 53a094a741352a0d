//! Account details for display.

use rust_decimal::{Decimal, RoundingStrategy};

use bankline_core::{AccountNumber, Money};

/// Variant-specific part of a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementDetails {
    Savings { interest_rate: Decimal },
    Checking {
        overdraft_limit: Money,
        transaction_fee: Money,
    },
}

/// Snapshot of an account's details, as returned by `Account::display_info`.
///
/// `Display` writes the common lines first and the variant lines after them:
///
/// ```text
/// Account Number: SA001
/// Customer Name: John Doe
/// Balance: $1000.00
/// Account Type: Savings Account
/// Interest Rate: 2.5%
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountStatement {
    pub account_number: AccountNumber,
    pub customer_name: String,
    pub balance: Money,
    pub details: StatementDetails,
}

impl AccountStatement {
    fn fmt_common(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Account Number: {}", self.account_number)?;
        writeln!(f, "Customer Name: {}", self.customer_name)?;
        write!(f, "Balance: ${}", self.balance)
    }
}

impl core::fmt::Display for AccountStatement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.fmt_common(f)?;

        match &self.details {
            StatementDetails::Savings { interest_rate } => {
                let rate = interest_rate.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
                write!(f, "\nAccount Type: Savings Account")?;
                write!(f, "\nInterest Rate: {rate:.1}%")
            }
            StatementDetails::Checking {
                overdraft_limit,
                transaction_fee,
            } => {
                write!(f, "\nAccount Type: Checking Account")?;
                write!(f, "\nOverdraft Limit: ${overdraft_limit}")?;
                write!(f, "\nTransaction Fee: ${transaction_fee}")
            }
        }
    }
}
