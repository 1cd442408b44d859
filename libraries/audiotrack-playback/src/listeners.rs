//! Listener registry
//!
//! Subscribers are keyed by a `ListenerHandle` and removed by handle, so the
//! same closure logic can be registered twice and unsubscribed independently.
//! Notification is synchronous and follows registration order.

use std::fmt;

/// Boxed listener callback
pub type Listener<T> = Box<dyn FnMut(&T)>;

/// Opaque subscription handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

/// Ordered set of listeners for one published value
pub struct ListenerRegistry<T> {
    next_handle: u64,
    listeners: Vec<(ListenerHandle, Listener<T>)>,
}

impl<T> Default for ListenerRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListenerRegistry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            next_handle: 0,
            listeners: Vec::new(),
        }
    }

    /// Register a listener; handles are never reused
    pub fn subscribe(&mut self, listener: Listener<T>) -> ListenerHandle {
        let handle = ListenerHandle(self.next_handle);
        self.next_handle += 1;
        self.listeners.push((handle, listener));
        handle
    }

    /// Remove a listener, returns false if the handle is unknown
    pub fn unsubscribe(&mut self, handle: ListenerHandle) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(h, _)| *h != handle);
        self.listeners.len() != before
    }

    /// Call every listener with `value`, in registration order
    pub fn notify(&mut self, value: &T) {
        for (_, listener) in &mut self.listeners {
            listener(value);
        }
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listener is registered
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<T> fmt::Debug for ListenerRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.len())
            .field("next_handle", &self.next_handle)
            .finish()
    }
}
