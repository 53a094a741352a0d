//! In-memory account book.

use std::collections::HashMap;

use thiserror::Error;

use bankline_accounts::{Account, AccountStatement, TransactionRecord};
use bankline_core::AccountNumber;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("account {0} already exists")]
    DuplicateAccount(AccountNumber),

    #[error("account {0} has not been opened")]
    NotOpened(AccountNumber),
}

/// Accounts keyed by account number, iterated in insertion order.
///
/// Owned by a single caller: mutation goes through `&mut self`, there are no locks.
#[derive(Debug, Clone, Default)]
pub struct AccountBook {
    accounts: Vec<Account>,
    index: HashMap<AccountNumber, usize>,
}

impl AccountBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an opened account. Numbers are unique within a book.
    pub fn insert(&mut self, account: Account) -> Result<(), BookError> {
        let number = account.account_number().clone();
        if !account.is_opened() {
            return Err(BookError::NotOpened(number));
        }
        if self.index.contains_key(&number) {
            return Err(BookError::DuplicateAccount(number));
        }

        self.index.insert(number, self.accounts.len());
        self.accounts.push(account);
        Ok(())
    }

    pub fn contains(&self, number: &AccountNumber) -> bool {
        self.index.contains_key(number)
    }

    pub fn get(&self, number: &AccountNumber) -> Option<&Account> {
        self.index.get(number).map(|&i| &self.accounts[i])
    }

    pub fn get_mut(&mut self, number: &AccountNumber) -> Option<&mut Account> {
        self.index.get(number).map(|&i| &mut self.accounts[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn history(&self, number: &AccountNumber) -> Option<&[TransactionRecord]> {
        self.get(number).map(Account::transaction_history)
    }

    /// Statements for every account, in insertion order.
    pub fn statements(&self) -> Vec<AccountStatement> {
        self.accounts.iter().map(Account::display_info).collect()
    }
}
