//! # Event Bus
//!
//! Synchronous, type-indexed publish/subscribe.
//!
//! ```text
//! subscribe::<Collision>(h1)     handlers[Collision] = [h1]
//! subscribe::<Collision>(h2)     handlers[Collision] = [h1, h2]
//! emit(ctx, Collision { .. })    h1(ctx, &event); h2(ctx, &event)
//! reset()                        handlers = {}
//! ```
//!
//! Handlers receive a dispatch context `C` at emit time instead of capturing
//! the state they mutate. The game passes its [`Registry`](crate::Registry)
//! here so a handler can touch components of the entities named in the event.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

/// Marker trait for event payloads.
pub trait Event: 'static {}

/// A subscribed handler with its event type erased.
trait ErasedHandler<C> {
    fn call(&mut self, ctx: &mut C, event: &dyn Any);
}

/// Concrete handler for one event type.
struct Handler<E, F> {
    callback: F,
    _event: std::marker::PhantomData<fn(&E)>,
}

impl<C, E, F> ErasedHandler<C> for Handler<E, F>
where
    E: Event,
    F: FnMut(&mut C, &E),
{
    fn call(&mut self, ctx: &mut C, event: &dyn Any) {
        // Handlers are filed under TypeId::of::<E>, so this always matches.
        if let Some(event) = event.downcast_ref::<E>() {
            (self.callback)(ctx, event);
        }
    }
}

type HandlerList<C> = Vec<Box<dyn ErasedHandler<C>>>;

/// Type-indexed synchronous event channel.
///
/// `C` is the context handed to every handler on dispatch.
///
/// # Example
///
/// ```rust
/// use kestrel_core::{Event, EventBus};
///
/// struct Scored(u32);
/// impl Event for Scored {}
///
/// let mut bus: EventBus<u32> = EventBus::new();
/// bus.subscribe(|total: &mut u32, event: &Scored| *total += event.0);
///
/// let mut total = 0;
/// bus.emit(&mut total, Scored(5));
/// bus.emit(&mut total, Scored(2));
/// assert_eq!(total, 7);
/// ```
pub struct EventBus<C = ()> {
    subscribers: HashMap<TypeId, HandlerList<C>>,
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> EventBus<C> {
    /// Creates a bus with no subscriptions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: HashMap::new(),
        }
    }

    /// Drops every subscription for every event type.
    pub fn reset(&mut self) {
        self.subscribers.clear();
    }

    /// Number of handlers subscribed to `E`.
    #[must_use]
    pub fn subscriber_count<E: Event>(&self) -> usize {
        self.subscribers
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }
}

impl<C: 'static> EventBus<C> {
    /// Subscribes a handler to event type `E`.
    ///
    /// Handlers for the same type run in subscription order.
    pub fn subscribe<E, F>(&mut self, callback: F)
    where
        E: Event,
        F: FnMut(&mut C, &E) + 'static,
    {
        self.subscribers
            .entry(TypeId::of::<E>())
            .or_default()
            .push(Box::new(Handler {
                callback,
                _event: std::marker::PhantomData,
            }));
        tracing::trace!(event = type_name::<E>(), "handler subscribed");
    }

    /// Delivers `event` to every handler subscribed to `E`, synchronously
    /// and in subscription order. Every handler sees the same value.
    ///
    /// With no subscribers this is a no-op.
    pub fn emit<E: Event>(&mut self, ctx: &mut C, event: E) {
        let Some(handlers) = self.subscribers.get_mut(&TypeId::of::<E>()) else {
            return;
        };
        tracing::trace!(
            event = type_name::<E>(),
            handlers = handlers.len(),
            "event emitted"
        );
        for handler in handlers.iter_mut() {
            handler.call(ctx, &event);
        }
    }
}
