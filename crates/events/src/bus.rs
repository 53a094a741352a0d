//! Event publishing/subscription abstraction (mechanics only).
//!
//! The bus distributes account events to whoever wants to observe them (the demo
//! narrator, counters, future projections). It is for distribution, not storage: the
//! account itself is the source of truth for its balance and history.
//!
//! - **Broadcast**: every live subscription receives every message published after it
//!   subscribed.
//! - **Ordered per publisher**: messages from one publisher arrive in publish order.
//! - **No persistence**: a subscriber that was not listening misses the message.

use std::sync::Arc;
use std::sync::mpsc::Receiver;

/// A subscription to an event stream.
///
/// ```ignore
/// let subscription = bus.subscribe();
/// while let Ok(envelope) = subscription.try_recv() {
///     narrate(&envelope);
/// }
/// ```
///
/// Subscriptions are meant for single-threaded consumption.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Drain every message that is already queued, without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// ```text
/// Command → Account (decide + apply) → Event Bus (publish) → Subscribers
/// ```
///
/// Events are applied to the account first and published afterwards, so a publish
/// failure never leaves the account half-updated. `publish()` failures are surfaced to the
/// caller (typically the `CommandDispatcher`).
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
