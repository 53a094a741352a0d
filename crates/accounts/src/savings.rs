//! Savings behaviour: interest accrual on top of the base account.

use chrono::Utc;
use rust_decimal::Decimal;

use bankline_core::{AccountNumber, Money};

use crate::account::{Account, AccountKind};
use crate::command::{AccountCommand, ApplyInterest, OpenAccount};
use crate::error::{AccountError, Operation};
use crate::event::{AccountEvent, InterestApplied};
use crate::receipt::Receipt;

/// Savings accounts start at or above zero with a non-negative rate.
pub(crate) fn validate_opening(initial_balance: Money, interest_rate: Decimal) -> Result<(), AccountError> {
    if interest_rate < Decimal::ZERO {
        return Err(AccountError::NegativeInterestRate { rate: interest_rate });
    }
    if initial_balance.is_negative() {
        return Err(AccountError::InvalidOpeningBalance {
            balance: initial_balance,
        });
    }
    Ok(())
}

impl Account {
    /// Open a savings account. `interest_rate` is a percentage (2.5 means 2.5%).
    pub fn open_savings(
        number: AccountNumber,
        customer_name: impl Into<String>,
        initial_balance: Money,
        interest_rate: Decimal,
    ) -> Result<Self, AccountError> {
        Self::open(OpenAccount {
            account_number: number,
            customer_name: customer_name.into(),
            initial_balance,
            kind: AccountKind::Savings { interest_rate },
            occurred_at: Utc::now(),
        })
    }

    /// `Some(rate)` for savings accounts.
    pub fn interest_rate(&self) -> Option<Decimal> {
        match self.kind() {
            AccountKind::Savings { interest_rate } => Some(interest_rate),
            AccountKind::Checking { .. } => None,
        }
    }

    /// Credit `balance * rate / 100`. Logs an INTEREST entry even when the amount is zero.
    pub fn apply_interest(&mut self) -> Result<Receipt, AccountError> {
        let number = self.account_number().clone();
        self.submit(AccountCommand::apply_interest(number))
    }

    pub(crate) fn handle_apply_interest(&self, cmd: &ApplyInterest) -> Result<Vec<AccountEvent>, AccountError> {
        self.ensure_open(&cmd.account_number)?;

        let AccountKind::Savings { interest_rate } = self.kind() else {
            return Err(AccountError::UnsupportedOperation {
                operation: Operation::ApplyInterest,
                account_type: self.account_type(),
            });
        };

        let amount = self
            .balance()
            .checked_percent(interest_rate)
            .ok_or_else(|| Self::out_of_range(Operation::ApplyInterest))?;
        self.balance()
            .checked_add(amount)
            .ok_or_else(|| Self::out_of_range(Operation::ApplyInterest))?;

        Ok(vec![AccountEvent::InterestApplied(InterestApplied {
            account_number: cmd.account_number.clone(),
            rate: interest_rate,
            amount,
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bankline_core::{AggregateRoot, DomainError};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    use crate::transaction::TransactionKind;

    fn sa001(balance: Decimal, rate: Decimal) -> Account {
        Account::open_savings(AccountNumber::new("SA001").unwrap(), "John Doe", Money::new(balance), rate)
            .unwrap()
    }

    #[test]
    fn negative_rate_is_rejected_at_opening() {
        let err = Account::open_savings(
            AccountNumber::new("SA002").unwrap(),
            "John Doe",
            Money::new(dec!(10)),
            dec!(-0.5),
        )
        .unwrap_err();
        assert_eq!(err, AccountError::NegativeInterestRate { rate: dec!(-0.5) });
    }

    #[test]
    fn negative_opening_balance_is_rejected() {
        let err = Account::open_savings(
            AccountNumber::new("SA003").unwrap(),
            "John Doe",
            Money::new(dec!(-1)),
            dec!(1),
        )
        .unwrap_err();
        assert!(matches!(err, AccountError::InvalidOpeningBalance { .. }));
    }

    #[test]
    fn interest_is_credited_and_logged() {
        let mut account = sa001(dec!(1500), dec!(2.5));
        let receipt = account.apply_interest().unwrap();

        assert_eq!(receipt.amount_of(TransactionKind::Interest), Some(Money::new(dec!(37.5))));
        assert_eq!(account.balance(), Money::new(dec!(1537.5)));
        assert_eq!(account.transaction_history()[0].to_string(), "INTEREST: $37.50");
    }

    #[test]
    fn interest_on_zero_balance_still_logs_entry() {
        let mut account = sa001(dec!(0), dec!(2.5));
        account.apply_interest().unwrap();

        assert_eq!(account.balance(), Money::ZERO);
        assert_eq!(account.transaction_history().len(), 1);
        assert_eq!(account.transaction_history()[0].kind, TransactionKind::Interest);
        assert_eq!(account.transaction_history()[0].amount, Money::ZERO);
    }

    #[test]
    fn interest_that_overflows_is_rejected() {
        let mut account = sa001(Decimal::MAX, dec!(2.5));
        let before = account.clone();

        let err = account.apply_interest().unwrap_err();
        assert!(matches!(err, AccountError::Domain(DomainError::Validation(_))));
        assert_eq!(account, before);
    }

    #[test]
    fn deposit_that_overflows_is_rejected() {
        let mut account = sa001(dec!(10), dec!(2.5));
        let before = account.clone();

        let err = account.deposit(Money::new(Decimal::MAX)).unwrap_err();
        assert!(matches!(err, AccountError::Domain(DomainError::Validation(_))));
        assert_eq!(account, before);
    }

    #[test]
    fn interest_on_checking_is_unsupported() {
        let mut account = Account::open_checking(
            AccountNumber::new("CA001").unwrap(),
            "Jane Smith",
            Money::new(dec!(100)),
            Money::new(dec!(50)),
        )
        .unwrap();
        let before = account.clone();

        let err = account.apply_interest().unwrap_err();
        assert!(matches!(
            err,
            AccountError::UnsupportedOperation {
                operation: Operation::ApplyInterest,
                ..
            }
        ));
        assert_eq!(account, before);
    }

    #[test]
    fn statement_lists_type_and_rate() {
        let text = sa001(dec!(1000), dec!(2.5)).display_info().to_string();
        assert!(text.ends_with("Account Type: Savings Account\nInterest Rate: 2.5%"));
    }

    #[test]
    fn savings_scenario() {
        let mut account = sa001(dec!(1000), dec!(2.5));

        account.deposit(Money::new(dec!(500))).unwrap();
        assert_eq!(account.balance(), Money::new(dec!(1500)));

        account.withdraw(Money::new(dec!(1300))).unwrap();
        assert_eq!(account.balance(), Money::new(dec!(200)));

        account.withdraw(Money::new(dec!(200))).unwrap();
        assert_eq!(account.balance(), Money::ZERO);

        account.apply_interest().unwrap();
        assert_eq!(account.balance(), Money::ZERO);

        let log: Vec<String> = account.transaction_history().iter().map(|r| r.to_string()).collect();
        assert_eq!(
            log,
            vec![
                "DEPOSIT: $500.00",
                "WITHDRAWAL: $1300.00",
                "WITHDRAWAL: $200.00",
                "INTEREST: $0.00",
            ]
        );
        assert_eq!(account.version(), 5);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: new balance = old * (1 + rate/100), logged interest = old * rate/100.
        #[test]
        fn interest_matches_rate(
            balance in 0i64..100_000_000i64,
            rate in 0i64..2_000i64,
        ) {
            let old = Decimal::new(balance, 2);
            let rate = Decimal::new(rate, 2);
            let mut account = sa001(old, rate);

            let receipt = account.apply_interest().unwrap();

            let expected_balance = old * (Decimal::ONE + rate / Decimal::ONE_HUNDRED);
            prop_assert_eq!(account.balance().amount(), expected_balance);
            prop_assert_eq!(receipt.entries().len(), 1);
            prop_assert_eq!(receipt.entries()[0].kind, TransactionKind::Interest);
            prop_assert_eq!(receipt.entries()[0].amount.amount(), old * rate / Decimal::ONE_HUNDRED);
        }
    }
}
