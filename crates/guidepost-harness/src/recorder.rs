#![forbid(unsafe_code)]

//! Event capture for assertions.

use std::cell::RefCell;
use std::rc::Rc;

use guidepost_runtime::{Notification, Notifier, Subscription};

/// Collects every event handed to its callback.
///
/// Clones share the same buffer.
#[derive(Debug)]
pub struct EventRecorder<E> {
    events: Rc<RefCell<Vec<E>>>,
}

impl<E> Clone for EventRecorder<E> {
    fn clone(&self) -> Self {
        Self {
            events: Rc::clone(&self.events),
        }
    }
}

impl<E> Default for EventRecorder<E> {
    fn default() -> Self {
        Self {
            events: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<E: Clone + 'static> EventRecorder<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A subscriber callback that appends to this recorder.
    pub fn callback(&self) -> impl Fn(&E) + 'static {
        let events = Rc::clone(&self.events);
        move |event: &E| events.borrow_mut().push(event.clone())
    }

    /// Subscribe to every event on `notifier`.
    pub fn attach(&self, notifier: &Notifier<E>) -> Subscription
    where
        E: Notification,
    {
        notifier.on_any(self.callback())
    }

    /// Snapshot of the events so far.
    #[must_use]
    pub fn events(&self) -> Vec<E> {
        self.events.borrow().clone()
    }

    /// Remove and return the events so far.
    pub fn take(&self) -> Vec<E> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Events for which `pred` holds.
    #[must_use]
    pub fn filter(&self, pred: impl Fn(&E) -> bool) -> Vec<E> {
        self.events.borrow().iter().filter(|e| pred(e)).cloned().collect()
    }
}

impl<E: Notification + Clone + 'static> EventRecorder<E> {
    /// Routing keys of the recorded events, in order.
    #[must_use]
    pub fn kinds(&self) -> Vec<E::Kind> {
        self.events.borrow().iter().map(Notification::kind).collect()
    }
}
