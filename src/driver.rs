//! Live driver: runs a [`Page`] against real time on a tokio runtime.
//!
//! Events arrive over an unbounded channel. Between events the driver sleeps
//! until the page's next timer deadline and then advances the page clock to
//! the real elapsed time. Everything happens inside one task, so events and
//! timer firings never interleave.

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

use crate::event::PageEvent;
use crate::page::Page;

/// Sends events into a running [`LiveDriver`].
#[derive(Debug, Clone)]
pub struct PageHandle {
    tx: mpsc::UnboundedSender<PageEvent>,
}

impl PageHandle {
    /// Send an event. Returns `false` once the driver has stopped.
    pub fn send(&self, event: PageEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Owns a page while it runs.
#[derive(Debug)]
pub struct LiveDriver {
    page: Page,
    events: mpsc::UnboundedReceiver<PageEvent>,
}

impl LiveDriver {
    /// Wrap a page, returning the driver and a handle to feed it.
    pub fn new(page: Page) -> (Self, PageHandle) {
        let (tx, events) = mpsc::unbounded_channel();
        (Self { page, events }, PageHandle { tx })
    }

    /// Run until every [`PageHandle`] is dropped, then hand the page back.
    ///
    /// The page clock is anchored to the instant `run` starts.
    pub async fn run(mut self) -> Page {
        let origin = Instant::now()
            .checked_sub(self.page.clock().now())
            .unwrap_or_else(Instant::now);

        loop {
            let deadline = self.page.next_deadline().map(|due| origin + due);
            tokio::select! {
                event = self.events.recv() => {
                    let Some(event) = event else { break };
                    self.page.advance_to(origin.elapsed());
                    self.page.dispatch(event);
                }
                () = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.page.advance_to(origin.elapsed());
                }
            }
        }

        tracing::debug!("page handles dropped; driver stopped");
        self.page
    }
}
