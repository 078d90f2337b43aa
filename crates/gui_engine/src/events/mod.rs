//! UI event queue
//!
//! The UI system reports what happened during input routing by queuing
//! [`Event`]s here. Host code registers [`EventHandler`]s per [`EventType`]
//! and drains the queue once per frame with [`EventSystem::dispatch`].
//!
//! - Key-value arguments (no order dependency)
//! - Handler returns bool (true = consumed, stops forwarding)
//! - Immediate and deferred delivery

pub mod signal;

pub use signal::{Signal, SubscriptionId};

use std::collections::HashMap;

use crate::ui::widgets::ButtonState;
use crate::ui::ElementId;

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Pointer entered an element
    MouseOver,
    /// Pointer left an element
    MouseOut,
    /// Button completed a click
    ButtonClicked,
    /// Button moved to another visual state
    ButtonStateChanged,
    /// Element gained or lost keyboard focus
    FocusChanged,
    /// Window the UI is laid out in changed size
    WindowResized,
}

/// Variant for type-safe event arguments
#[derive(Debug, Clone, PartialEq)]
pub enum EventArg {
    /// Element the event concerns
    Element(ElementId),
    /// Button state
    State(ButtonState),
    /// Flag value
    Flag(bool),
    /// Width and height in pixels
    Size(f32, f32),
}

/// Event with type ID and key-value arguments
#[derive(Debug, Clone)]
pub struct Event {
    /// Type of event
    pub event_type: EventType,
    /// UI time when the event was created (seconds)
    pub timestamp: f64,
    args: HashMap<&'static str, EventArg>,
}

impl Event {
    /// Create a new event with the given type and timestamp
    pub fn new(event_type: EventType, timestamp: f64) -> Self {
        Self {
            event_type,
            timestamp,
            args: HashMap::new(),
        }
    }

    /// Event concerning a single element
    pub fn for_element(event_type: EventType, timestamp: f64, element: ElementId) -> Self {
        Self::new(event_type, timestamp).with_arg("element", EventArg::Element(element))
    }

    /// Add an argument to the event (builder pattern)
    pub fn with_arg(mut self, key: &'static str, value: EventArg) -> Self {
        self.args.insert(key, value);
        self
    }

    /// Get an argument by key
    pub fn get_arg(&self, key: &str) -> Option<&EventArg> {
        self.args.get(key)
    }

    /// Element argument if present
    pub fn element(&self) -> Option<ElementId> {
        match self.get_arg("element") {
            Some(EventArg::Element(id)) => Some(*id),
            _ => None,
        }
    }

    /// State stored under `key` (`"from"` or `"to"` for state changes)
    pub fn state(&self, key: &str) -> Option<ButtonState> {
        match self.get_arg(key) {
            Some(EventArg::State(state)) => Some(*state),
            _ => None,
        }
    }

    /// Flag stored under `key`
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.get_arg(key) {
            Some(EventArg::Flag(value)) => Some(*value),
            _ => None,
        }
    }

    /// Size argument if present
    pub fn size(&self) -> Option<(f32, f32)> {
        match self.get_arg("size") {
            Some(EventArg::Size(w, h)) => Some((*w, *h)),
            _ => None,
        }
    }
}

/// Event handler trait
///
/// Returns true if the event was consumed, which stops forwarding to
/// handlers registered after this one.
pub trait EventHandler {
    /// Handle an event, return true if consumed
    fn on_event(&mut self, event: &Event) -> bool;
}

/// Event system with registration and queuing
pub struct EventSystem {
    immediate_queue: Vec<Event>,
    deferred_queue: Vec<(f64, Event)>,
    handlers: HashMap<EventType, Vec<Box<dyn EventHandler>>>,
    current_time: f64,
}

impl EventSystem {
    /// Create a new empty event system
    pub fn new() -> Self {
        Self {
            immediate_queue: Vec::new(),
            deferred_queue: Vec::new(),
            handlers: HashMap::new(),
            current_time: 0.0,
        }
    }

    /// Update current time (seconds since start)
    pub fn update_time(&mut self, time: f64) {
        self.current_time = time;
    }

    /// Current time as last set by [`update_time`](Self::update_time)
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Register a handler for a specific event type
    pub fn register_handler(&mut self, event_type: EventType, handler: Box<dyn EventHandler>) {
        self.handlers.entry(event_type).or_default().push(handler);
    }

    /// Queue an event for the next dispatch
    pub fn send(&mut self, event: Event) {
        self.immediate_queue.push(event);
    }

    /// Queue an event that is delivered once `delivery_time` is reached
    pub fn post(&mut self, delivery_time: f64, event: Event) {
        self.deferred_queue.push((delivery_time, event));
    }

    /// Events waiting for the next dispatch, in the order they were sent
    pub fn pending(&self) -> &[Event] {
        &self.immediate_queue
    }

    /// Dispatch all pending events
    ///
    /// Processes the immediate queue first, then due deferred events.
    /// Returns the number of events delivered.
    pub fn dispatch(&mut self) -> usize {
        let immediate = std::mem::take(&mut self.immediate_queue);
        let mut delivered = immediate.len();
        for event in immediate {
            self.dispatch_event(&event);
        }

        let now = self.current_time;
        let (due, later): (Vec<_>, Vec<_>) = std::mem::take(&mut self.deferred_queue)
            .into_iter()
            .partition(|(time, _)| *time <= now);
        self.deferred_queue = later;
        delivered += due.len();
        for (_, event) in due {
            self.dispatch_event(&event);
        }
        delivered
    }

    fn dispatch_event(&mut self, event: &Event) {
        if let Some(handlers) = self.handlers.get_mut(&event.event_type) {
            for handler in handlers.iter_mut() {
                if handler.on_event(event) {
                    break;
                }
            }
        }
    }

    /// Drop all queued events without delivering them
    pub fn clear(&mut self) {
        self.immediate_queue.clear();
        self.deferred_queue.clear();
    }
}

impl Default for EventSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSystem")
            .field("immediate", &self.immediate_queue.len())
            .field("deferred", &self.deferred_queue.len())
            .field("handler_types", &self.handlers.len())
            .field("current_time", &self.current_time)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct RecordingHandler {
        seen: Rc<RefCell<Vec<(usize, EventType)>>>,
        tag: usize,
        consume: bool,
    }

    impl EventHandler for RecordingHandler {
        fn on_event(&mut self, event: &Event) -> bool {
            self.seen.borrow_mut().push((self.tag, event.event_type));
            self.consume
        }
    }

    fn recorder(seen: &Rc<RefCell<Vec<(usize, EventType)>>>, tag: usize, consume: bool) -> Box<RecordingHandler> {
        Box::new(RecordingHandler { seen: Rc::clone(seen), tag, consume })
    }

    #[test]
    fn test_immediate_dispatch_in_send_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut system = EventSystem::new();
        system.register_handler(EventType::MouseOver, recorder(&seen, 0, false));
        system.register_handler(EventType::MouseOut, recorder(&seen, 0, false));

        system.send(Event::new(EventType::MouseOut, 0.0));
        system.send(Event::new(EventType::MouseOver, 0.0));
        assert_eq!(system.pending().len(), 2);
        assert_eq!(system.dispatch(), 2);

        assert_eq!(*seen.borrow(), vec![(0, EventType::MouseOut), (0, EventType::MouseOver)]);
        assert!(system.pending().is_empty());
    }

    #[test]
    fn test_deferred_dispatch() {
        let mut system = EventSystem::new();
        system.post(1.0, Event::new(EventType::ButtonClicked, 0.0));

        system.update_time(0.5);
        assert_eq!(system.dispatch(), 0);
        assert_eq!(system.deferred_queue.len(), 1);

        system.update_time(1.0);
        assert_eq!(system.dispatch(), 1);
        assert!(system.deferred_queue.is_empty());
    }

    #[test]
    fn test_event_consumption() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut system = EventSystem::new();
        system.register_handler(EventType::ButtonClicked, recorder(&seen, 1, true));
        system.register_handler(EventType::ButtonClicked, recorder(&seen, 2, false));

        system.send(Event::new(EventType::ButtonClicked, 0.0));
        system.dispatch();

        assert_eq!(*seen.borrow(), vec![(1, EventType::ButtonClicked)]);
    }

    #[test]
    fn test_typed_arguments() {
        let event = Event::new(EventType::ButtonStateChanged, 2.0)
            .with_arg("from", EventArg::State(ButtonState::Normal))
            .with_arg("to", EventArg::State(ButtonState::Pressed))
            .with_arg("size", EventArg::Size(4.0, 3.0));

        assert_eq!(event.state("from"), Some(ButtonState::Normal));
        assert_eq!(event.state("to"), Some(ButtonState::Pressed));
        assert_eq!(event.size(), Some((4.0, 3.0)));
        assert_eq!(event.element(), None);
        assert_eq!(event.flag("focused"), None);
    }
}
