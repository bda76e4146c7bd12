//! Property tests for the notifier.
//!
//! # Invariants Tested
//!
//! 1. **Delivery count**: `emit` returns exactly the number of live,
//!    non-panicking subscribers for that kind plus wildcard subscribers.
//! 2. **Unsubscribe is final**: a dropped guard is never called again.
//! 3. **Isolation**: panicking subscribers never stop later ones.

use std::cell::Cell;
use std::rc::Rc;

use guidepost_runtime::{Notification, Notifier, Subscription};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Kind {
    Red,
    Blue,
}

#[derive(Debug)]
struct Signal(Kind);

impl Notification for Signal {
    type Kind = Kind;

    fn kind(&self) -> Kind {
        self.0
    }
}

#[derive(Debug, Clone)]
enum Op {
    SubscribeRed { panics: bool },
    SubscribeBlue { panics: bool },
    SubscribeAny,
    DropOldest,
    EmitRed,
    EmitBlue,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<bool>().prop_map(|panics| Op::SubscribeRed { panics }),
        any::<bool>().prop_map(|panics| Op::SubscribeBlue { panics }),
        Just(Op::SubscribeAny),
        Just(Op::DropOldest),
        Just(Op::EmitRed),
        Just(Op::EmitBlue),
    ]
}

struct Model {
    // (kind filter, panics, guard, hit counter)
    subs: Vec<(Option<Kind>, bool, Subscription, Rc<Cell<u32>>)>,
}

impl Model {
    fn expected(&self, kind: Kind) -> usize {
        self.subs
            .iter()
            .filter(|(filter, panics, _, _)| filter.is_none_or(|k| k == kind) && !panics)
            .count()
    }
}

proptest! {
    #[test]
    fn emit_reaches_exactly_live_subscribers(ops in proptest::collection::vec(op_strategy(), 1..60)) {
        let notifier = Notifier::<Signal>::new();
        let mut model = Model { subs: Vec::new() };
        let mut dropped: Vec<Rc<Cell<u32>>> = Vec::new();

        for op in ops {
            match op {
                Op::SubscribeRed { panics } | Op::SubscribeBlue { panics } => {
                    let kind = if matches!(op, Op::SubscribeRed { .. }) { Kind::Red } else { Kind::Blue };
                    let hits = Rc::new(Cell::new(0));
                    let h = Rc::clone(&hits);
                    let guard = notifier.on(kind, move |_| {
                        h.set(h.get() + 1);
                        if panics {
                            panic!("deliberate");
                        }
                    });
                    model.subs.push((Some(kind), panics, guard, hits));
                }
                Op::SubscribeAny => {
                    let hits = Rc::new(Cell::new(0));
                    let h = Rc::clone(&hits);
                    let guard = notifier.on_any(move |_| h.set(h.get() + 1));
                    model.subs.push((None, false, guard, hits));
                }
                Op::DropOldest => {
                    if !model.subs.is_empty() {
                        let (_, _, guard, hits) = model.subs.remove(0);
                        drop(guard);
                        dropped.push(hits);
                    }
                }
                Op::EmitRed | Op::EmitBlue => {
                    let kind = if matches!(op, Op::EmitRed) { Kind::Red } else { Kind::Blue };
                    let before: Vec<u32> = dropped.iter().map(|h| h.get()).collect();
                    let delivered = notifier.emit(&Signal(kind));
                    prop_assert_eq!(delivered, model.expected(kind));
                    let after: Vec<u32> = dropped.iter().map(|h| h.get()).collect();
                    prop_assert_eq!(before, after);
                }
            }
        }
    }
}
