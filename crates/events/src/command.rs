use bankline_core::AccountNumber;

/// A command targets a specific account.
///
/// Commands represent **intent** ("withdraw 2500"). They are rejected when invalid and
/// turned into events (facts) when accepted. Routing infrastructure uses
/// `target_account()` to find the account that must decide.
pub trait Command: Clone + core::fmt::Debug + Send + Sync + 'static {
    fn target_account(&self) -> &AccountNumber;
}
