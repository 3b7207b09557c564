//! Explicit callback registration between hosts, engines and renderers.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered set of callbacks notified with a shared reference to each event.
///
/// Listeners run in registration order on the caller's thread.
pub struct ListenerRegistry<E> {
    next_id: u64,
    listeners: Vec<(ListenerId, Box<dyn FnMut(&E)>)>,
}

impl<E> ListenerRegistry<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub fn add_listener(&mut self, listener: impl FnMut(&E) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the listener was already removed.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn notify(&mut self, event: &E) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<E> Default for ListenerRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    #[test]
    fn notifies_in_registration_order_until_removed() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ListenerRegistry::<u32>::new();
        assert!(registry.is_empty());

        let first = {
            let seen = Rc::clone(&seen);
            registry.add_listener(move |value| seen.borrow_mut().push(("first", *value)))
        };
        {
            let seen = Rc::clone(&seen);
            registry.add_listener(move |value| seen.borrow_mut().push(("second", *value)));
        }

        registry.notify(&1);
        assert!(registry.remove_listener(first));
        assert!(!registry.remove_listener(first));
        registry.notify(&2);

        assert_eq!(
            *seen.borrow(),
            vec![("first", 1), ("second", 1), ("second", 2)]
        );
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }
}
