//! Infrastructure layer: account book and command dispatch.

pub mod account_book;
pub mod command_dispatcher;


pub use account_book::{AccountBook, BookError};
pub use command_dispatcher::{AGGREGATE_TYPE, CommandDispatcher, DispatchError};
