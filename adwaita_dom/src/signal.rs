// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lightweight multi-subscriber notifications.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

/// Identifier returned by [`Signal::connect`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type Handler<T> = Rc<dyn Fn(&T)>;

struct Handlers<T> {
    next: u64,
    list: Vec<(HandlerId, Handler<T>)>,
}

/// A list of handlers invoked with `&T` on [`Signal::emit`].
///
/// Clones share the same handler list. Each emit works on a snapshot of the
/// handlers, so handlers may connect or disconnect (themselves included)
/// while it runs; changes take effect at the next emit.
pub struct Signal<T> {
    handlers: Rc<RefCell<Handlers<T>>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            handlers: Rc::clone(&self.handlers),
        }
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self {
            handlers: Rc::new(RefCell::new(Handlers {
                next: 0,
                list: Vec::new(),
            })),
        }
    }
}

impl<T> core::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Signal")
            .field("handlers", &self.len())
            .finish()
    }
}

impl<T> Signal<T> {
    /// A signal with no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler.
    pub fn connect(&self, handler: impl Fn(&T) + 'static) -> HandlerId {
        let mut handlers = self.handlers.borrow_mut();
        handlers.next += 1;
        let id = HandlerId(handlers.next);
        let handler: Box<dyn Fn(&T)> = Box::new(handler);
        handlers.list.push((id, Rc::from(handler)));
        id
    }

    /// Remove a handler. Returns `false` if it was not connected.
    pub fn disconnect(&self, id: HandlerId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.list.len();
        handlers.list.retain(|(h, _)| *h != id);
        handlers.list.len() != before
    }

    /// Number of connected handlers.
    pub fn len(&self) -> usize {
        self.handlers.borrow().list.len()
    }

    /// Whether no handler is connected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invoke every handler in connection order.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<Handler<T>> = self
            .handlers
            .borrow()
            .list
            .iter()
            .map(|(_, h)| Rc::clone(h))
            .collect();
        for handler in snapshot {
            handler(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn handlers_run_in_order_and_disconnect() {
        let signal: Signal<u32> = Signal::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let a = {
            let seen = Rc::clone(&seen);
            signal.connect(move |v| seen.borrow_mut().push(*v))
        };
        {
            let seen = Rc::clone(&seen);
            signal.connect(move |v| seen.borrow_mut().push(*v * 10));
        }
        signal.emit(&2);
        assert!(signal.disconnect(a));
        assert!(!signal.disconnect(a));
        signal.emit(&3);
        assert_eq!(*seen.borrow(), [2, 20, 30]);
    }

    #[test]
    fn handler_may_disconnect_itself() {
        let signal: Signal<()> = Signal::new();
        let calls = Rc::new(Cell::new(0));
        let slot: Rc<Cell<Option<HandlerId>>> = Rc::new(Cell::new(None));
        let id = {
            let signal = signal.clone();
            let calls = Rc::clone(&calls);
            let slot = Rc::clone(&slot);
            signal.clone().connect(move |()| {
                calls.set(calls.get() + 1);
                if let Some(id) = slot.get() {
                    signal.disconnect(id);
                }
            })
        };
        slot.set(Some(id));
        signal.emit(&());
        signal.emit(&());
        assert_eq!(calls.get(), 1);
        assert!(signal.is_empty());
    }
}
