//! `bankline-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no logging).

pub mod aggregate;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use id::AccountNumber;
pub use money::Money;
pub use value_object::ValueObject;
