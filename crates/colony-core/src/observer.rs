//! Change-notification primitives.
//!
//! Every observable entity (building, planet, configuration) owns a
//! [`Signal`]: a shared subscriber list with synchronous, subscription-order
//! dispatch. Containers re-broadcast child changes by subscribing a
//! [`Relay`] into each child's signal; the relay re-emits the container's
//! own signal within the same call stack, so a building-level change reaches
//! a configuration-level observer before control returns to the mutator.
//!
//! Dispatch is single-threaded and recursive by design. The fan-out depth is
//! bounded by the ownership chain (building -> planet -> configuration).

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Receives change notifications from an observed entity.
///
/// `update` takes `&self`; observers that track state use interior
/// mutability (`Cell`, `RefCell`).
pub trait Observer {
    /// Called after the observed entity's externally visible state changed.
    fn update(&self);
}

/// A shared list of subscribers with synchronous dispatch.
///
/// `Signal` is a cheap handle: clones share the same subscriber list, which
/// is what lets a container's relay and the container itself emit through
/// one list. Subscribing the same observer twice is a no-op (it will never
/// be notified twice per change), and unsubscribing a non-subscriber does
/// nothing.
#[derive(Clone, Default)]
pub struct Signal {
    subscribers: Rc<RefCell<Vec<Rc<dyn Observer>>>>,
}

/// Observer identity: the allocation address, ignoring vtable metadata.
/// Fat-pointer comparison on `dyn` objects is unreliable across codegen
/// units, so compare thin data pointers.
fn observer_addr(observer: &dyn Observer) -> *const () {
    observer as *const dyn Observer as *const ()
}

impl Signal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. No-op if this exact observer is already
    /// subscribed.
    pub fn subscribe(&self, observer: Rc<dyn Observer>) {
        let mut subscribers = self.subscribers.borrow_mut();
        let addr = observer_addr(observer.as_ref());
        if subscribers
            .iter()
            .any(|existing| observer_addr(existing.as_ref()) == addr)
        {
            return;
        }
        subscribers.push(observer);
    }

    /// Remove an observer. No-op if it was never subscribed.
    pub fn unsubscribe(&self, observer: &dyn Observer) {
        let addr = observer_addr(observer);
        self.subscribers
            .borrow_mut()
            .retain(|existing| observer_addr(existing.as_ref()) != addr);
    }

    /// Number of currently subscribed observers.
    pub fn observer_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Notify every subscriber, in subscription order, before returning.
    ///
    /// The subscriber list is snapshotted first so that re-entrant emits
    /// (relay chains) and subscribe/unsubscribe calls made from inside an
    /// `update` never observe a live borrow.
    pub fn emit(&self) {
        let snapshot: Vec<Rc<dyn Observer>> = self.subscribers.borrow().clone();
        for observer in snapshot {
            observer.update();
        }
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("observers", &self.observer_count())
            .finish()
    }
}

/// An observer that re-emits a downstream signal on every update.
///
/// Planets and configurations subscribe one relay into each child; the
/// relay's identity doubles as the subscription handle, so removal is just
/// unsubscribing the relay.
#[derive(Debug)]
pub(crate) struct Relay {
    downstream: Signal,
}

impl Relay {
    pub(crate) fn new(downstream: Signal) -> Self {
        Self { downstream }
    }
}

impl Observer for Relay {
    fn update(&self) {
        self.downstream.emit();
    }
}
