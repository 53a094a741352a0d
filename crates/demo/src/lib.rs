//! Scripted walkthrough of the bankline workspace.
//!
//! Opens one savings and one checking account, runs deposits, withdrawals, interest and an
//! overdraft-limit change through the `CommandDispatcher`, and narrates each step.

pub mod narrate;
pub mod scenario;

pub use scenario::{Outcome, run};
