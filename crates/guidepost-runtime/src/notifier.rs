#![forbid(unsafe_code)]

//! Typed observer registry with per-subscriber fault isolation.
//!
//! # Design
//!
//! A [`Notifier<E>`] keeps an ordered list of callbacks per event kind plus
//! a list of wildcard callbacks that see every event. Callbacks are stored
//! as `Weak` references; the strong `Rc` lives in the [`Subscription`] guard
//! returned to the caller, so dropping the guard unsubscribes.
//!
//! # Invariants
//!
//! 1. Kind-specific subscribers run before wildcard subscribers, each group
//!    in registration order.
//! 2. A panicking subscriber is logged at `error` level and skipped. The
//!    remaining subscribers still run and `emit` returns normally.
//! 3. Subscribing or unsubscribing from inside a callback is allowed. The
//!    change takes effect from the next `emit`.
//!
//! # Failure Modes
//!
//! - **Guard leak**: a `Subscription` kept alive forever keeps its callback
//!   registered. Dead entries are pruned lazily during `emit`.
//! - **`panic = "abort"` builds**: isolation relies on unwinding; with abort
//!   a panicking subscriber terminates the process like any other panic.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::{Rc, Weak};

use tracing::{error, trace};

/// An event that can be routed by kind.
pub trait Notification {
    /// Discriminant used for routing.
    type Kind: Copy + Eq + Hash + fmt::Debug;

    /// The routing key of this event.
    fn kind(&self) -> Self::Kind;
}

type CallbackRc<E> = Rc<dyn Fn(&E)>;
type CallbackWeak<E> = Weak<dyn Fn(&E)>;

struct NotifierInner<E: Notification> {
    by_kind: HashMap<E::Kind, Vec<CallbackWeak<E>>>,
    wildcard: Vec<CallbackWeak<E>>,
}

/// Publish/subscribe hub for events of type `E`.
///
/// Cloning a `Notifier` yields another handle to the same registry.
pub struct Notifier<E: Notification> {
    inner: Rc<RefCell<NotifierInner<E>>>,
}

impl<E: Notification> Clone for Notifier<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E: Notification> Default for Notifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Notification> fmt::Debug for Notifier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Notifier")
            .field("kinds", &inner.by_kind.len())
            .field("wildcard", &inner.wildcard.len())
            .finish()
    }
}

impl<E: Notification> Notifier<E> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(NotifierInner {
                by_kind: HashMap::new(),
                wildcard: Vec::new(),
            })),
        }
    }
}

impl<E: Notification + 'static> Notifier<E> {
    /// Subscribe to events of one kind.
    pub fn on(&self, kind: E::Kind, callback: impl Fn(&E) + 'static) -> Subscription {
        let strong: CallbackRc<E> = Rc::new(callback);
        self.inner
            .borrow_mut()
            .by_kind
            .entry(kind)
            .or_default()
            .push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Subscribe to every event.
    pub fn on_any(&self, callback: impl Fn(&E) + 'static) -> Subscription {
        let strong: CallbackRc<E> = Rc::new(callback);
        self.inner.borrow_mut().wildcard.push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Deliver `event` to its subscribers and return how many ran without
    /// panicking.
    pub fn emit(&self, event: &E) -> usize {
        let kind = event.kind();
        let callbacks: Vec<CallbackRc<E>> = {
            let mut inner = self.inner.borrow_mut();
            let mut live = Vec::new();
            if let Some(list) = inner.by_kind.get_mut(&kind) {
                list.retain(|w| w.strong_count() > 0);
                live.extend(list.iter().filter_map(Weak::upgrade));
            }
            inner.wildcard.retain(|w| w.strong_count() > 0);
            live.extend(inner.wildcard.iter().filter_map(Weak::upgrade));
            live
        };

        trace!(?kind, subscribers = callbacks.len(), "emit");

        let mut delivered = 0;
        for (index, cb) in callbacks.iter().enumerate() {
            match catch_unwind(AssertUnwindSafe(|| cb(event))) {
                Ok(()) => delivered += 1,
                Err(payload) => {
                    error!(
                        ?kind,
                        subscriber = index,
                        panic = panic_message(payload.as_ref()),
                        "event subscriber panicked"
                    );
                }
            }
        }
        delivered
    }

    /// Drop every registration. Outstanding guards become inert.
    pub fn clear(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.by_kind.clear();
        inner.wildcard.clear();
    }

    /// Live subscribers for `kind`, not counting wildcard subscribers.
    #[must_use]
    pub fn subscriber_count(&self, kind: E::Kind) -> usize {
        self.inner
            .borrow()
            .by_kind
            .get(&kind)
            .map_or(0, |list| list.iter().filter(|w| w.strong_count() > 0).count())
    }

    /// Live wildcard subscribers.
    #[must_use]
    pub fn wildcard_count(&self) -> usize {
        self.inner
            .borrow()
            .wildcard
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping it makes the callback unreachable. The stale `Weak` entry is
/// pruned on the next emit.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl Subscription {
    /// Keep the callback registered for the lifetime of the notifier.
    pub fn detach(self) {
        std::mem::forget(self);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
