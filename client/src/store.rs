//! Single-threaded observable state.
//!
//! View-models and the session publish their state through a [`Store`]; the
//! UI shell subscribes and mirrors every write into its own reactive
//! primitives.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct Listeners<T> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, Listener<T>)>>,
}

/// Fan-out of events of type `T` to any number of listeners.
pub struct Emitter<T: 'static> {
    listeners: Rc<Listeners<T>>,
}

impl<T: 'static> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<T: 'static> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Emitter<T> {
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(Listeners {
                next_id: Cell::new(0),
                entries: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = self.listeners.next_id.get();
        self.listeners.next_id.set(id + 1);
        self.listeners
            .entries
            .borrow_mut()
            .push((id, Rc::new(listener)));

        let weak: Weak<Listeners<T>> = Rc::downgrade(&self.listeners);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(listeners) = weak.upgrade() {
                    listeners.entries.borrow_mut().retain(|(i, _)| *i != id);
                }
            })),
        }
    }

    /// Calls every listener registered at the time of the call. Listeners
    /// may subscribe, unsubscribe or emit again while being notified.
    pub fn emit(&self, event: &T) {
        let current: Vec<Listener<T>> = self
            .listeners
            .entries
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in current {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.entries.borrow().len()
    }
}

/// Keeps a listener registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Keeps the listener for as long as its source lives.
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Observable value. Cloning yields another handle to the same value.
pub struct Store<T: 'static> {
    value: Rc<RefCell<T>>,
    changes: Emitter<T>,
}

impl<T: 'static> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            changes: self.changes.clone(),
        }
    }
}

impl<T: Clone + 'static> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            changes: Emitter::new(),
        }
    }

    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    pub fn set(&self, value: T) {
        *self.value.borrow_mut() = value;
        self.notify();
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.value.borrow_mut());
        self.notify();
    }

    /// Like [`update`](Self::update) but hands back whatever `f` returns.
    pub fn update_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let out = f(&mut self.value.borrow_mut());
        self.notify();
        out
    }

    /// Listener receives a snapshot after every write.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        self.changes.subscribe(listener)
    }

    fn notify(&self) {
        let snapshot = self.value.borrow().clone();
        self.changes.emit(&snapshot);
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Store").field(&self.value.borrow()).finish()
    }
}
