//! Observers that record what a gadget shows or publishes

use gadgets_rs::pipeline::{DisplayState, Gadget, Subscription};
use std::cell::RefCell;
use std::rc::Rc;

/// Records every display state a gadget shows, in order.
pub struct DisplayRecorder {
    seen: Rc<RefCell<Vec<DisplayState>>>,
    _subscription: Subscription,
}

impl DisplayRecorder {
    pub fn attach(gadget: &Gadget) -> Self {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let subscription = gadget
            .display()
            .subscribe(move |state| sink.borrow_mut().push(state.clone()));
        Self {
            seen,
            _subscription: subscription,
        }
    }

    pub fn states(&self) -> Vec<DisplayState> {
        self.seen.borrow().clone()
    }

    pub fn last(&self) -> Option<DisplayState> {
        self.seen.borrow().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.seen.borrow().len()
    }
}

/// Shared log of `(label, value)` pairs written by several observers.
#[derive(Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<(String, Vec<u8>)>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to a gadget's first output, logging under `label`.
    pub fn watch_output(&self, gadget: &Gadget, label: &str) -> Subscription {
        let events = Rc::clone(&self.events);
        let label = label.to_string();
        gadget.outputs()[0].subscribe(move |value| {
            events.borrow_mut().push((label.clone(), value.to_vec()));
        })
    }

    pub fn labels(&self) -> Vec<String> {
        self.events.borrow().iter().map(|(l, _)| l.clone()).collect()
    }

    pub fn events(&self) -> Vec<(String, Vec<u8>)> {
        self.events.borrow().clone()
    }
}
