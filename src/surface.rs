//! The seams between widgets and whatever owns the display.
//!
//! # Terminology
//!
//! * buffer: The type, [`Buffer`][crate::Buffer]. A character grid in memory, owned by the display's driver.
//! * surface: Something which accepts [`Request`]s from widgets, e.g. "redraw soon" when a progress value changes.
//!   Widgets reach it through their [`StyleConfig`][crate::StyleConfig], so it must be shareable.
//! * host: The owning context an interactive dialog is [shown][crate::dialogs::Interactive::show] in. It supplies
//!   keys and redraws the dialog synchronously when asked.

use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use crate::{key::Key, widgets::Widget, Result};

/// Something a widget asks of its display surface.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Request {
    /// Some state changed; the display should be redrawn at its next opportunity.
    Redraw,
    /// Remove whatever was placed at `(row, column)`; it won't be drawing itself anymore.
    Delete { row: usize, column: usize },
}

/// A display surface, as seen by widgets.
///
/// Requests are queued, never acted on reentrantly: a widget calls these from inside its own mutators and `render`,
/// so implementations must not call back into the widget.
pub trait Surface: Send + Sync {
    /// Accept one request.
    fn request(&self, req: Request);

    fn request_redraw(&self) {
        self.request(Request::Redraw)
    }

    fn delete(&self, row: usize, column: usize) {
        self.request(Request::Delete { row, column })
    }
}

/// A [`Surface`] which just queues every request until the display's driver drains them.
#[derive(Default, Debug)]
pub struct RequestQueue {
    queue: Mutex<VecDeque<Request>>,
}

impl RequestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Request>> {
        // the queue is plain data, so a panic elsewhere can't leave it inconsistent
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take every pending request, oldest first.
    pub fn drain(&self) -> Vec<Request> {
        self.lock().drain(..).collect()
    }

    /// How many requests are waiting.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Surface for RequestQueue {
    fn request(&self, req: Request) {
        tracing::trace!(?req, "queueing surface request");
        self.lock().push_back(req);
    }
}

/// The owning context a dialog runs in while it's being shown.
///
/// The only place anything in this crate waits is [`Self::poll_key`].
pub trait Host {
    /// Wait up to `timeout` for the next key. `Ok(None)` means nothing was pressed in time.
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<Key>>;

    /// Render `widget` and push the result to the display before returning.
    fn update(&mut self, widget: &mut dyn Widget) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_drains_in_order() {
        let q = RequestQueue::new();
        q.request_redraw();
        q.delete(3, 4);
        assert_eq!(q.len(), 2);
        assert_eq!(
            q.drain(),
            vec![Request::Redraw, Request::Delete { row: 3, column: 4 }]
        );
        assert!(q.is_empty());
    }
}
