//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two instances with the same attribute values are
/// interchangeable. They are immutable; "changing" one means producing a new value.
///
/// ```ignore
/// let a = Money::new(dec!(1.50));
/// let b = Money::new(dec!(1.5));
/// assert_eq!(a, b); // equal by value, scale is irrelevant
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
