use core::fmt;
use std::sync::Weak;
use std::time::Duration;

use crate::event::server::{EventServer, ListenerToken};
use crate::event::Event;

/// The engine (and with it the event server) was dropped; there will be no
/// further events. Non-fatal — consumers decide how to wind down.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ServerGone;

impl fmt::Display for ServerGone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("event server is gone")
    }
}

impl std::error::Error for ServerGone {}

/// A per-consumer cursor into the event log.
///
/// Listeners hold only a weak reference to the server, so observers never
/// keep a dropped engine alive. Dropping the listener deregisters its
/// cursor and unpins the log.
pub struct EventListener {
    server: Weak<EventServer>,
    token: ListenerToken,
}

impl EventListener {
    pub(crate) fn new(server: Weak<EventServer>, token: ListenerToken) -> Self {
        Self { server, token }
    }

    /// Non-blocking: the next matching event if one is queued.
    pub fn poll(&self) -> Result<Option<Event>, ServerGone> {
        match self.server.upgrade() {
            Some(server) => Ok(server.try_pop(self.token)),
            None => Err(ServerGone),
        }
    }

    /// Blocks until an event is available; `None` when the server is
    /// already gone.
    pub fn listen(&self) -> Option<Event> {
        // Holding the upgraded Arc keeps the server alive for the wait.
        let server = self.server.upgrade()?;
        Some(server.wait(self.token))
    }

    /// Blocks up to `timeout`; `Ok(None)` on timeout.
    pub fn listen_for(&self, timeout: Duration) -> Result<Option<Event>, ServerGone> {
        match self.server.upgrade() {
            Some(server) => Ok(server.wait_timeout(self.token, timeout)),
            None => Err(ServerGone),
        }
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        if let Some(server) = self.server.upgrade() {
            server.release(self.token);
        }
    }
}

impl fmt::Debug for EventListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListener")
            .field("token", &self.token)
            .field("server_alive", &(self.server.strong_count() > 0))
            .finish()
    }
}
