//! Window resize notifications
//!
//! Listeners are flags: `fire` raises every registered flag and each owner
//! consumes its own with `take` on its next frame. Removing a listener
//! guarantees later resizes are never observed through that id.

/// Handle for a registered resize listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registry of resize listeners
#[derive(Debug, Default)]
pub struct ResizeEvents {
    next_id: u64,
    /// (listener, resized since last take)
    listeners: Vec<(ListenerId, bool)>,
}

impl ResizeEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, false));
        id
    }

    /// Returns false if the listener was not registered
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        self.listeners.len() != before
    }

    /// Notify every listener of a resize
    pub fn fire(&mut self) {
        for (_, pending) in &mut self.listeners {
            *pending = true;
        }
    }

    /// Consume a pending notification for `id`
    pub fn take(&mut self, id: ListenerId) -> bool {
        match self.listeners.iter_mut().find(|(l, _)| *l == id) {
            Some((_, pending)) => std::mem::replace(pending, false),
            None => false,
        }
    }

    #[cfg(test)]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
