use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::{debug, trace};

use crate::event::{Event, EventFilter, EventListener};

pub(crate) type ListenerToken = u32;

/// The append-only event log shared by all listeners.
///
/// Cursors are absolute log indexes; `base` is the index of the oldest
/// retained event, advancing as fully-consumed events are trimmed. All
/// state sits behind one mutex; a condition variable wakes blocked
/// listeners when a batch lands.
pub struct EventServer {
    state: Mutex<State>,
    available: Condvar,
}

struct State {
    events: VecDeque<Event>,
    base: usize,
    listeners: HashMap<ListenerToken, ListenerPosition>,
    token_counter: ListenerToken,
}

#[derive(Debug, Copy, Clone)]
struct ListenerPosition {
    filter: EventFilter,
    cursor: usize,
}

impl Default for EventServer {
    fn default() -> Self {
        Self::new()
    }
}

impl EventServer {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                events: VecDeque::new(),
                base: 0,
                listeners: HashMap::new(),
                token_counter: 0,
            }),
            available: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panic while holding the lock leaves plain data; keep serving.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a listener starting at the oldest retained event.
    pub fn subscribe(server: &Arc<EventServer>, filter: EventFilter) -> EventListener {
        let mut state = server.lock();
        let token = state.token_counter;
        state.token_counter += 1;
        let cursor = state.base;
        state.listeners.insert(token, ListenerPosition { filter, cursor });
        trace!("listener {token} subscribed with {filter:?}");
        EventListener::new(Arc::downgrade(server), token)
    }

    pub(crate) fn release(&self, token: ListenerToken) {
        let mut state = self.lock();
        state.listeners.remove(&token);
        state.trim_consumed();
        trace!("listener {token} released");
    }

    /// Appends a transaction's events as one atomic batch and wakes
    /// blocked listeners.
    pub(crate) fn push_events(&self, events: Vec<Event>) {
        if events.is_empty() {
            return;
        }
        let mut state = self.lock();
        debug!("publishing {} events", events.len());
        state.events.extend(events);
        drop(state);
        self.available.notify_all();
    }

    /// Pops the next matching event, or `None` when the listener is up to
    /// date.
    pub(crate) fn try_pop(&self, token: ListenerToken) -> Option<Event> {
        let mut state = self.lock();
        state.pop(token)
    }

    /// Blocks until a matching event arrives.
    pub(crate) fn wait(&self, token: ListenerToken) -> Event {
        let mut state = self.lock();
        loop {
            if let Some(event) = state.pop(token) {
                return event;
            }
            state = self
                .available
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Blocks until a matching event arrives or the timeout elapses.
    pub(crate) fn wait_timeout(&self, token: ListenerToken, timeout: Duration) -> Option<Event> {
        let deadline = std::time::Instant::now() + timeout;
        let mut state = self.lock();
        loop {
            if let Some(event) = state.pop(token) {
                return Some(event);
            }
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            if remaining.is_zero() {
                return None;
            }
            let (guard, result) = self
                .available
                .wait_timeout(state, remaining)
                .unwrap_or_else(PoisonError::into_inner);
            state = guard;
            if result.timed_out() {
                return state.pop(token);
            }
        }
    }
}

impl State {
    /// The absolute index of the next event `position` will take.
    fn next_index(&self, position: ListenerPosition) -> usize {
        let mut index = position.cursor.max(self.base);
        while let Some(event) = self.events.get(index - self.base) {
            let skip = position.filter == EventFilter::SkipNonDrawable
                && !event.geometry.should_draw();
            if !skip {
                break;
            }
            index += 1;
        }
        index
    }

    fn pop(&mut self, token: ListenerToken) -> Option<Event> {
        let position = *self.listeners.get(&token)?;
        let index = self.next_index(position);
        let event = self.events.get(index - self.base)?.clone();
        if let Some(position) = self.listeners.get_mut(&token) {
            position.cursor = index + 1;
        }
        self.trim_consumed();
        Some(event)
    }

    /// Drops events every live listener has passed. With no listeners the
    /// log is kept so a late subscriber can still replay the scene.
    fn trim_consumed(&mut self) {
        let Some(min_cursor) = self.listeners.values().map(|p| p.cursor).min() else {
            return;
        };
        while self.base < min_cursor && !self.events.is_empty() {
            self.events.pop_front();
            self.base += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec3;
    use crate::event::EventKind;
    use crate::geometry::Geometry;
    use crate::path::Path;

    fn drawable_event(name: &str) -> Event {
        Event {
            path: Path::parse(&format!(".{name}")).unwrap(),
            geometry: Geometry::new(vec![Vec3::zero()], Vec::new(), Vec3::zero()),
            kind: EventKind::Add,
        }
    }

    fn layout_event(name: &str) -> Event {
        Event {
            path: Path::parse(&format!(".{name}")).unwrap(),
            geometry: Geometry::empty(Vec3::zero(), Default::default()),
            kind: EventKind::Move,
        }
    }

    #[test]
    fn listeners_have_independent_cursors() {
        let server = Arc::new(EventServer::new());
        let fast = EventServer::subscribe(&server, EventFilter::ReceiveAll);
        let slow = EventServer::subscribe(&server, EventFilter::ReceiveAll);
        server.push_events(vec![drawable_event("a"), drawable_event("b")]);

        assert_eq!(fast.poll().unwrap().unwrap().path.to_string(), ".a");
        assert_eq!(fast.poll().unwrap().unwrap().path.to_string(), ".b");
        assert!(fast.poll().unwrap().is_none());

        assert_eq!(slow.poll().unwrap().unwrap().path.to_string(), ".a");
    }

    #[test]
    fn skip_non_drawable_filter() {
        let server = Arc::new(EventServer::new());
        let filtered = EventServer::subscribe(&server, EventFilter::SkipNonDrawable);
        let all = EventServer::subscribe(&server, EventFilter::ReceiveAll);
        server.push_events(vec![layout_event("spacer"), drawable_event("mesh")]);

        assert_eq!(filtered.poll().unwrap().unwrap().path.to_string(), ".mesh");
        assert!(filtered.poll().unwrap().is_none());

        assert_eq!(all.poll().unwrap().unwrap().path.to_string(), ".spacer");
        assert_eq!(all.poll().unwrap().unwrap().path.to_string(), ".mesh");
    }

    #[test]
    fn fully_consumed_events_are_trimmed() {
        let server = Arc::new(EventServer::new());
        let listener = EventServer::subscribe(&server, EventFilter::ReceiveAll);
        server.push_events(vec![drawable_event("a"), drawable_event("b")]);
        listener.poll().unwrap();
        listener.poll().unwrap();

        let state = server.lock();
        assert!(state.events.is_empty());
        assert_eq!(state.base, 2);
    }

    #[test]
    fn new_listener_starts_at_oldest_retained() {
        let server = Arc::new(EventServer::new());
        server.push_events(vec![drawable_event("history")]);
        let late = EventServer::subscribe(&server, EventFilter::ReceiveAll);
        assert_eq!(late.poll().unwrap().unwrap().path.to_string(), ".history");
    }

    #[test]
    fn dropping_a_listener_releases_its_cursor() {
        let server = Arc::new(EventServer::new());
        let stuck = EventServer::subscribe(&server, EventFilter::ReceiveAll);
        let active = EventServer::subscribe(&server, EventFilter::ReceiveAll);
        server.push_events(vec![drawable_event("a")]);
        active.poll().unwrap();

        // The stuck listener pins the log.
        assert_eq!(server.lock().events.len(), 1);
        drop(stuck);
        server.push_events(vec![drawable_event("b")]);
        active.poll().unwrap();
        assert!(server.lock().events.is_empty());
    }
}
