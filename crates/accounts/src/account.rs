use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bankline_core::{Aggregate, AggregateRoot, AccountNumber, DomainError, Money};

use crate::command::{AccountCommand, Deposit, OpenAccount, Withdraw};
use crate::error::{AccountError, Operation};
use crate::event::{AccountEvent, AccountOpened, FundsDeposited, FundsWithdrawn};
use crate::receipt::Receipt;
use crate::statement::{AccountStatement, StatementDetails};
use crate::transaction::{TransactionKind, TransactionRecord};

/// Account variant and its variant-specific parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccountKind {
    /// Interest-bearing account; the balance never goes below zero.
    Savings { interest_rate: Decimal },
    /// Fee-per-withdrawal account that may overdraw down to `-overdraft_limit`.
    Checking { overdraft_limit: Money },
}

impl AccountKind {
    pub fn account_type(&self) -> AccountType {
        match self {
            AccountKind::Savings { .. } => AccountType::Savings,
            AccountKind::Checking { .. } => AccountType::Checking,
        }
    }
}

/// Variant tag without parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Savings,
    Checking,
}

impl core::fmt::Display for AccountType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AccountType::Savings => f.write_str("Savings Account"),
            AccountType::Checking => f.write_str("Checking Account"),
        }
    }
}

/// Aggregate root: Account.
///
/// One record for both variants. The balance is only ever changed by `apply`, and every
/// balance-changing event logs exactly one `TransactionRecord`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    number: AccountNumber,
    customer_name: String,
    kind: AccountKind,
    balance: Money,
    history: Vec<TransactionRecord>,
    version: u64,
    opened: bool,
}

impl Account {
    /// Create an empty, not-yet-opened aggregate instance for rehydration.
    pub fn empty(number: AccountNumber) -> Self {
        Self {
            number,
            customer_name: String::new(),
            kind: AccountKind::Savings {
                interest_rate: Decimal::ZERO,
            },
            balance: Money::ZERO,
            history: Vec::new(),
            version: 0,
            opened: false,
        }
    }

    /// Open an account from a full `OpenAccount` command.
    pub fn open(cmd: OpenAccount) -> Result<Self, AccountError> {
        let mut account = Self::empty(cmd.account_number.clone());
        account.execute(&AccountCommand::Open(cmd))?;
        Ok(account)
    }

    /// Rebuild an account by replaying its events in order.
    ///
    /// The first event must be `AccountOpened`.
    pub fn from_history(number: AccountNumber, events: &[AccountEvent]) -> Result<Self, AccountError> {
        if !matches!(events.first(), Some(AccountEvent::AccountOpened(_))) {
            return Err(AccountError::NotOpened);
        }

        let mut account = Self::empty(number);
        for (position, event) in events.iter().enumerate() {
            account.ensure_account_number(event.account_number())?;
            if position > 0 && matches!(event, AccountEvent::AccountOpened(_)) {
                return Err(DomainError::invariant("an account can only be opened once").into());
            }
            if account.balance_after(event).is_none() {
                return Err(DomainError::invariant("replayed balance out of range").into());
            }
            account.apply(event);
        }
        Ok(account)
    }

    pub fn account_number(&self) -> &AccountNumber {
        &self.number
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn account_type(&self) -> AccountType {
        self.kind.account_type()
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn is_opened(&self) -> bool {
        self.opened
    }

    /// Full ordered transaction log. Callers get a read-only view.
    pub fn transaction_history(&self) -> &[TransactionRecord] {
        &self.history
    }

    /// Account details; variant lines follow the common ones.
    pub fn display_info(&self) -> AccountStatement {
        let details = match self.kind {
            AccountKind::Savings { interest_rate } => StatementDetails::Savings { interest_rate },
            AccountKind::Checking { overdraft_limit } => StatementDetails::Checking {
                overdraft_limit,
                transaction_fee: crate::checking::TRANSACTION_FEE,
            },
        };

        AccountStatement {
            account_number: self.number.clone(),
            customer_name: self.customer_name.clone(),
            balance: self.balance,
            details,
        }
    }

    pub fn deposit(&mut self, amount: Money) -> Result<Receipt, AccountError> {
        let number = self.number.clone();
        self.submit(AccountCommand::deposit(number, amount))
    }

    /// Savings: plain withdrawal. Checking: withdrawal plus fee, within the overdraft limit.
    pub fn withdraw(&mut self, amount: Money) -> Result<Receipt, AccountError> {
        let number = self.number.clone();
        self.submit(AccountCommand::withdraw(number, amount))
    }

    /// Decide and apply a command, reporting what happened.
    ///
    /// On `Err` the account is unchanged.
    pub fn submit(&mut self, command: AccountCommand) -> Result<Receipt, AccountError> {
        let logged_before = self.history.len();
        let events = self.execute(&command)?;
        let entries = self.history[logged_before..].to_vec();
        Ok(Receipt::new(self.number.clone(), events, entries, self.balance))
    }

    /// Balance once `event` is applied, or `None` when it does not fit in a `Money`.
    pub(crate) fn balance_after(&self, event: &AccountEvent) -> Option<Money> {
        match event {
            AccountEvent::AccountOpened(e) if !self.opened => Some(e.initial_balance),
            AccountEvent::AccountOpened(_) | AccountEvent::OverdraftLimitChanged(_) => Some(self.balance),
            AccountEvent::FundsDeposited(e) => self.balance.checked_add(e.amount),
            AccountEvent::InterestApplied(e) => self.balance.checked_add(e.amount),
            AccountEvent::FundsWithdrawn(e) => self.balance.checked_sub(e.amount),
            AccountEvent::FeeCharged(e) => self.balance.checked_sub(e.amount),
        }
    }

    fn log_transaction(&mut self, kind: TransactionKind, amount: Money, occurred_at: DateTime<Utc>) {
        let sequence = self.history.len() as u64 + 1;
        self.history.push(TransactionRecord {
            sequence,
            kind,
            amount,
            occurred_at,
        });
    }
}

impl AggregateRoot for Account {
    type Id = AccountNumber;

    fn id(&self) -> &Self::Id {
        &self.number
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for Account {
    type Command = AccountCommand;
    type Event = AccountEvent;
    type Error = AccountError;

    fn apply(&mut self, event: &Self::Event) {
        // Handlers and replay reject events whose balance would not fit.
        if let Some(balance) = self.balance_after(event) {
            self.balance = balance;
        }

        match event {
            AccountEvent::AccountOpened(_) if self.opened => return,
            AccountEvent::AccountOpened(e) => {
                self.number = e.account_number.clone();
                self.customer_name = e.customer_name.clone();
                self.kind = e.kind;
                self.balance = e.initial_balance;
                self.opened = true;
            }
            AccountEvent::FundsDeposited(e) => {
                self.log_transaction(TransactionKind::Deposit, e.amount, e.occurred_at);
            }
            AccountEvent::FundsWithdrawn(e) => {
                self.log_transaction(TransactionKind::Withdrawal, e.amount, e.occurred_at);
            }
            AccountEvent::FeeCharged(e) => {
                self.log_transaction(TransactionKind::Fee, e.amount, e.occurred_at);
            }
            AccountEvent::InterestApplied(e) => {
                self.log_transaction(TransactionKind::Interest, e.amount, e.occurred_at);
            }
            AccountEvent::OverdraftLimitChanged(e) => {
                if let AccountKind::Checking { overdraft_limit } = &mut self.kind {
                    *overdraft_limit = e.new_limit;
                }
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            AccountCommand::Open(cmd) => self.handle_open(cmd),
            AccountCommand::Deposit(cmd) => self.handle_deposit(cmd),
            AccountCommand::Withdraw(cmd) => match self.kind {
                AccountKind::Savings { .. } => self.handle_withdraw(cmd),
                AccountKind::Checking { overdraft_limit } => {
                    self.handle_checking_withdraw(cmd, overdraft_limit)
                }
            },
            AccountCommand::ApplyInterest(cmd) => self.handle_apply_interest(cmd),
            AccountCommand::SetOverdraftLimit(cmd) => self.handle_set_overdraft_limit(cmd),
        }
    }
}

impl Account {
    pub(crate) fn ensure_account_number(&self, number: &AccountNumber) -> Result<(), AccountError> {
        if &self.number != number {
            return Err(AccountError::AccountNumberMismatch {
                expected: self.number.clone(),
                found: number.clone(),
            });
        }
        Ok(())
    }

    /// Common guard for every command that operates on an existing account.
    pub(crate) fn ensure_open(&self, number: &AccountNumber) -> Result<(), AccountError> {
        if !self.opened {
            return Err(AccountError::NotOpened);
        }
        self.ensure_account_number(number)
    }

    pub(crate) fn ensure_positive(operation: Operation, amount: Money) -> Result<(), AccountError> {
        if !amount.is_positive() {
            return Err(AccountError::NonPositiveAmount { operation, amount });
        }
        Ok(())
    }

    pub(crate) fn out_of_range(operation: Operation) -> AccountError {
        DomainError::validation(format!("{operation} amount is out of range")).into()
    }

    fn handle_open(&self, cmd: &OpenAccount) -> Result<Vec<AccountEvent>, AccountError> {
        if self.opened {
            return Err(AccountError::AlreadyOpened);
        }
        self.ensure_account_number(&cmd.account_number)?;

        if cmd.customer_name.trim().is_empty() {
            return Err(DomainError::validation("customer name cannot be blank").into());
        }

        match cmd.kind {
            AccountKind::Savings { interest_rate } => {
                crate::savings::validate_opening(cmd.initial_balance, interest_rate)?
            }
            AccountKind::Checking { overdraft_limit } => {
                crate::checking::validate_opening(cmd.initial_balance, overdraft_limit)?
            }
        }

        Ok(vec![AccountEvent::AccountOpened(AccountOpened {
            account_number: cmd.account_number.clone(),
            customer_name: cmd.customer_name.trim().to_string(),
            initial_balance: cmd.initial_balance,
            kind: cmd.kind,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_deposit(&self, cmd: &Deposit) -> Result<Vec<AccountEvent>, AccountError> {
        self.ensure_open(&cmd.account_number)?;
        Self::ensure_positive(Operation::Deposit, cmd.amount)?;
        self.balance
            .checked_add(cmd.amount)
            .ok_or_else(|| Self::out_of_range(Operation::Deposit))?;

        Ok(vec![AccountEvent::FundsDeposited(FundsDeposited {
            account_number: cmd.account_number.clone(),
            amount: cmd.amount,
            occurred_at: cmd.occurred_at,
        })])
    }

    /// Base withdrawal: no fee, never below zero.
    fn handle_withdraw(&self, cmd: &Withdraw) -> Result<Vec<AccountEvent>, AccountError> {
        self.ensure_open(&cmd.account_number)?;
        Self::ensure_positive(Operation::Withdraw, cmd.amount)?;

        if cmd.amount > self.balance {
            return Err(AccountError::InsufficientFunds {
                requested: cmd.amount,
                available: self.balance,
            });
        }

        Ok(vec![AccountEvent::FundsWithdrawn(FundsWithdrawn {
            account_number: cmd.account_number.clone(),
            amount: cmd.amount,
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn number(s: &str) -> AccountNumber {
        AccountNumber::new(s).unwrap()
    }

    fn money(value: Decimal) -> Money {
        Money::new(value)
    }

    fn savings(balance: Decimal) -> Account {
        Account::open_savings(number("SA001"), "John Doe", money(balance), dec!(2.5)).unwrap()
    }

    fn checking(balance: Decimal, limit: Decimal) -> Account {
        Account::open_checking(number("CA001"), "Jane Smith", money(balance), money(limit)).unwrap()
    }

    fn cents() -> impl Strategy<Value = Money> {
        (-1_000_000i64..1_000_000i64).prop_map(|c| Money::new(Decimal::new(c, 2)))
    }

    fn any_account() -> impl Strategy<Value = Account> {
        prop_oneof![
            (0i64..1_000_000i64).prop_map(|c| savings(Decimal::new(c, 2))),
            (0i64..1_000_000i64, 0i64..100_000i64)
                .prop_map(|(c, l)| checking(Decimal::new(c, 2), Decimal::new(l, 2))),
        ]
    }

    #[test]
    fn opening_sets_identity_without_logging() {
        let account = savings(dec!(1000));
        assert!(account.is_opened());
        assert_eq!(account.account_number().as_str(), "SA001");
        assert_eq!(account.customer_name(), "John Doe");
        assert_eq!(account.balance(), money(dec!(1000)));
        assert!(account.transaction_history().is_empty());
        assert_eq!(account.version(), 1);
    }

    #[test]
    fn blank_customer_name_is_rejected() {
        let err = Account::open_savings(number("SA002"), "  ", Money::ZERO, dec!(1)).unwrap_err();
        assert!(matches!(err, AccountError::Domain(DomainError::Validation(_))));
    }

    #[test]
    fn opening_twice_is_rejected() {
        let account = savings(dec!(10));
        let cmd = OpenAccount {
            account_number: number("SA001"),
            customer_name: "John Doe".to_string(),
            initial_balance: Money::ZERO,
            kind: account.kind(),
            occurred_at: Utc::now(),
        };
        assert_eq!(account.handle(&AccountCommand::Open(cmd)), Err(AccountError::AlreadyOpened));
    }

    #[test]
    fn commands_on_unopened_account_are_rejected() {
        let mut account = Account::empty(number("SA009"));
        assert_eq!(account.deposit(money(dec!(5))), Err(AccountError::NotOpened));
        assert_eq!(account.version(), 0);
    }

    #[test]
    fn command_for_another_account_is_rejected() {
        let account = savings(dec!(10));
        let cmd = AccountCommand::deposit(number("CA001"), money(dec!(5)));
        let err = account.handle(&cmd).unwrap_err();
        assert!(matches!(err, AccountError::AccountNumberMismatch { .. }));
    }

    #[test]
    fn deposit_logs_one_entry_and_reports_balance() {
        let mut account = checking(dec!(2000), dec!(500));
        let receipt = account.deposit(money(dec!(300))).unwrap();

        assert_eq!(receipt.balance(), money(dec!(2300)));
        assert_eq!(receipt.entries().len(), 1);
        assert_eq!(receipt.entries()[0].kind, TransactionKind::Deposit);
        assert_eq!(account.transaction_history()[0].to_string(), "DEPOSIT: $300.00");
    }

    #[test]
    fn base_withdraw_of_entire_balance_succeeds() {
        let mut account = savings(dec!(200));
        let receipt = account.withdraw(money(dec!(200))).unwrap();
        assert_eq!(receipt.balance(), Money::ZERO);
        assert_eq!(account.transaction_history()[0].kind, TransactionKind::Withdrawal);
    }

    #[test]
    fn base_withdraw_over_balance_is_rejected() {
        let mut account = savings(dec!(200));
        let err = account.withdraw(money(dec!(200.01))).unwrap_err();
        assert_eq!(
            err,
            AccountError::InsufficientFunds {
                requested: money(dec!(200.01)),
                available: money(dec!(200)),
            }
        );
        assert_eq!(account.balance(), money(dec!(200)));
        assert!(account.transaction_history().is_empty());
    }

    #[test]
    fn statement_starts_with_common_lines() {
        let text = checking(dec!(2000), dec!(500)).display_info().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Account Number: CA001");
        assert_eq!(lines[1], "Customer Name: Jane Smith");
        assert_eq!(lines[2], "Balance: $2000.00");
        assert_eq!(lines[3], "Account Type: Checking Account");
    }

    #[test]
    fn replaying_events_rebuilds_the_account() {
        let mut account = checking(dec!(2000), dec!(500));
        let opened = AccountEvent::AccountOpened(AccountOpened {
            account_number: number("CA001"),
            customer_name: "Jane Smith".to_string(),
            initial_balance: money(dec!(2000)),
            kind: AccountKind::Checking {
                overdraft_limit: money(dec!(500)),
            },
            occurred_at: Utc::now(),
        });

        let mut events = vec![opened];
        events.extend(account.deposit(money(dec!(300))).unwrap().events().to_vec());
        events.extend(account.withdraw(money(dec!(2500))).unwrap().events().to_vec());
        events.extend(account.set_overdraft_limit(money(dec!(1000))).unwrap().events().to_vec());

        let rebuilt = Account::from_history(number("CA001"), &events).unwrap();
        assert_eq!(rebuilt.balance(), account.balance());
        assert_eq!(rebuilt.transaction_history(), account.transaction_history());
        assert_eq!(rebuilt.overdraft_limit(), account.overdraft_limit());
        assert_eq!(rebuilt.version(), account.version());
    }

    #[test]
    fn replay_requires_opening_event() {
        let events = vec![AccountEvent::FundsDeposited(FundsDeposited {
            account_number: number("SA001"),
            amount: money(dec!(1)),
            occurred_at: Utc::now(),
        })];
        assert_eq!(
            Account::from_history(number("SA001"), &events),
            Err(AccountError::NotOpened)
        );
    }

    #[test]
    fn reapplying_an_opening_keeps_identity_and_balance() {
        let mut account = savings(dec!(10));
        account.deposit(money(dec!(5))).unwrap();
        let before = account.clone();

        account.apply(&AccountEvent::AccountOpened(AccountOpened {
            account_number: number("ZZ999"),
            customer_name: "Someone Else".to_string(),
            initial_balance: money(dec!(1000000)),
            kind: AccountKind::Checking {
                overdraft_limit: money(dec!(50)),
            },
            occurred_at: Utc::now(),
        }));

        assert_eq!(account.account_number(), before.account_number());
        assert_eq!(account.customer_name(), "John Doe");
        assert_eq!(account.balance(), money(dec!(15)));
        assert_eq!(account.account_type(), AccountType::Savings);
        assert_eq!(account.transaction_history(), before.transaction_history());
    }

    #[test]
    fn replay_rejects_balances_out_of_range() {
        let number = number("SA001");
        let events = vec![
            AccountEvent::AccountOpened(AccountOpened {
                account_number: number.clone(),
                customer_name: "John Doe".to_string(),
                initial_balance: money(Decimal::MAX),
                kind: AccountKind::Savings {
                    interest_rate: dec!(2.5),
                },
                occurred_at: Utc::now(),
            }),
            AccountEvent::FundsDeposited(FundsDeposited {
                account_number: number.clone(),
                amount: money(dec!(1)),
                occurred_at: Utc::now(),
            }),
        ];
        let err = Account::from_history(number, &events).unwrap_err();
        assert!(matches!(err, AccountError::Domain(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn replay_rejects_a_second_opening() {
        let opened = AccountEvent::AccountOpened(AccountOpened {
            account_number: number("SA001"),
            customer_name: "John Doe".to_string(),
            initial_balance: money(dec!(10)),
            kind: AccountKind::Savings {
                interest_rate: dec!(2.5),
            },
            occurred_at: Utc::now(),
        });
        let err = Account::from_history(number("SA001"), &[opened.clone(), opened]).unwrap_err();
        assert!(matches!(err, AccountError::Domain(DomainError::InvariantViolation(_))));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: non-positive deposits never touch balance, log, or version.
        #[test]
        fn non_positive_deposit_changes_nothing(
            mut account in any_account(),
            amount in cents().prop_filter("non-positive", |m| !m.is_positive()),
        ) {
            let before = account.clone();
            let err = account.deposit(amount).unwrap_err();
            let is_non_positive = matches!(err, AccountError::NonPositiveAmount { .. });
            prop_assert!(is_non_positive);
            prop_assert_eq!(account, before);
        }

        /// Property: a positive deposit adds exactly `amount` and logs one DEPOSIT.
        #[test]
        fn positive_deposit_adds_exactly_amount(
            mut account in any_account(),
            amount in cents().prop_filter("positive", |m| m.is_positive()),
        ) {
            let before = account.balance();
            let logged = account.transaction_history().len();

            account.deposit(amount).unwrap();

            prop_assert_eq!(account.balance().amount(), before.amount() + amount.amount());
            prop_assert_eq!(account.transaction_history().len(), logged + 1);
            let last = account.transaction_history().last().unwrap();
            prop_assert_eq!(last.kind, TransactionKind::Deposit);
            prop_assert_eq!(last.amount, amount);
        }

        /// Property: base withdraw succeeds iff 0 < amount <= balance.
        #[test]
        fn base_withdraw_respects_balance(
            balance in 0i64..1_000_000i64,
            amount in cents(),
        ) {
            let mut account = savings(Decimal::new(balance, 2));
            let before = account.clone();

            match account.withdraw(amount) {
                Ok(receipt) => {
                    prop_assert!(amount.is_positive() && amount <= before.balance());
                    prop_assert_eq!(receipt.balance().amount(), before.balance().amount() - amount.amount());
                    prop_assert_eq!(receipt.entries().len(), 1);
                    prop_assert_eq!(receipt.entries()[0].kind, TransactionKind::Withdrawal);
                }
                Err(_) => {
                    prop_assert!(!amount.is_positive() || amount > before.balance());
                    prop_assert_eq!(account, before);
                }
            }
        }
    }
}
