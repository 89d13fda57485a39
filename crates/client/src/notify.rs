//! Change notification for view state.
//!
//! Controllers publish a small event after each mutation. A listener drains
//! what it has missed and re-reads whatever it shows; events never carry the
//! state itself.

use std::cell::RefCell;
use std::sync::mpsc::{self, Receiver, Sender};

/// One listener's queue of events.
#[derive(Debug)]
pub struct Subscription<M>(Receiver<M>);

impl<M> Subscription<M> {
    /// Everything published since the last drain, oldest first.
    pub fn drain(&self) -> Vec<M> {
        self.0.try_iter().collect()
    }
}

/// Fan-out to every live subscription. Controllers are owned by a single UI
/// task, so listeners sit behind a `RefCell`.
#[derive(Debug)]
pub struct Notifier<M> {
    listeners: RefCell<Vec<Sender<M>>>,
}

impl<M> Default for Notifier<M> {
    fn default() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
        }
    }
}

impl<M: Clone> Notifier<M> {
    /// Deliver `event` to every subscription; dropped ones are forgotten.
    pub fn publish(&self, event: M) {
        self.listeners
            .borrow_mut()
            .retain(|listener| listener.send(event.clone()).is_ok());
    }

    pub fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();
        self.listeners.borrow_mut().push(tx);
        Subscription(rx)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}
