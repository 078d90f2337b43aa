//! Subscribe / fire delegate used for widget callbacks such as
//! [`UIButton::clicked`](crate::ui::widgets::UIButton::clicked).

use std::fmt;

/// Token returned by [`Signal::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A list of callbacks invoked in subscription order
pub struct Signal<T> {
    slots: Vec<(SubscriptionId, Box<dyn FnMut(&T)>)>,
    next_id: u64,
}

impl<T> Signal<T> {
    /// Create a signal with no subscribers
    pub fn new() -> Self {
        Self { slots: Vec::new(), next_id: 0 }
    }

    /// Add a callback
    pub fn subscribe(&mut self, callback: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.slots.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|(slot, _)| *slot != id);
        self.slots.len() != before
    }

    /// Invoke every callback with `value`
    pub fn fire(&mut self, value: &T) {
        for (_, callback) in &mut self.slots {
            callback(value);
        }
    }

    /// Number of subscribed callbacks
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when nothing is subscribed
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal").field("subscribers", &self.slots.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_fire_and_unsubscribe() {
        let total = Rc::new(Cell::new(0));
        let mut signal = Signal::<i32>::new();

        let first = {
            let total = Rc::clone(&total);
            signal.subscribe(move |v| total.set(total.get() + v))
        };
        {
            let total = Rc::clone(&total);
            signal.subscribe(move |v| total.set(total.get() + v * 10));
        }

        signal.fire(&1);
        assert_eq!(total.get(), 11);

        assert!(signal.unsubscribe(first));
        assert!(!signal.unsubscribe(first));
        signal.fire(&1);
        assert_eq!(total.get(), 21);
        assert_eq!(signal.len(), 1);
    }
}
