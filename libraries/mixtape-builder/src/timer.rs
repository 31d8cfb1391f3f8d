//! Reveal timer
//!
//! Runs at most one delayed reveal at a time on the tokio runtime. A fired
//! timer sends its ticket back over a channel; the builder feeds it to the
//! drag session, which decides whether it still applies.

use crate::drag::{RevealTicket, TimerCommand};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

/// One-shot cancellable timer for insertion-point reveals
#[derive(Debug)]
pub struct RevealScheduler {
    delay: Duration,
    tx: mpsc::UnboundedSender<RevealTicket>,
    rx: mpsc::UnboundedReceiver<RevealTicket>,
    armed: Option<(RevealTicket, JoinHandle<()>)>,
}

impl RevealScheduler {
    /// Create a scheduler with the given dwell delay
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            tx,
            rx,
            armed: None,
        }
    }

    /// Dwell delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Check if a timer is pending
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Carry out a command from the drag session
    pub fn apply(&mut self, command: TimerCommand) {
        match command {
            TimerCommand::None => {}
            TimerCommand::Cancel => self.cancel(),
            TimerCommand::Arm(ticket) => self.arm(ticket),
        }
    }

    /// Start a timer for the ticket, cancelling any pending one
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm(&mut self, ticket: RevealTicket) {
        self.cancel();

        let tx = self.tx.clone();
        let delay = self.delay;
        let fired = ticket.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the builder was dropped
            let _ = tx.send(fired);
        });

        self.armed = Some((ticket, handle));
    }

    /// Cancel the pending timer, if any
    pub fn cancel(&mut self) {
        if let Some((ticket, handle)) = self.armed.take() {
            trace!(?ticket, "Cancelling reveal timer");
            handle.abort();
        }
    }

    /// Take a fired ticket without waiting
    pub fn try_next(&mut self) -> Option<RevealTicket> {
        let ticket = self.rx.try_recv().ok()?;
        self.disarm_if(&ticket);
        Some(ticket)
    }

    /// Wait for the pending timer to fire
    ///
    /// Returns `None` immediately when nothing is pending. Tickets left over
    /// from earlier timers are discarded.
    pub async fn next(&mut self) -> Option<RevealTicket> {
        loop {
            let armed = self.armed.as_ref()?.0.clone();
            let ticket = self.rx.recv().await?;
            if ticket == armed {
                self.armed = None;
                return Some(ticket);
            }
            trace!(?ticket, "Discarding stale reveal ticket");
        }
    }

    fn disarm_if(&mut self, ticket: &RevealTicket) {
        if self
            .armed
            .as_ref()
            .is_some_and(|(armed, _)| armed == ticket)
        {
            self.armed = None;
        }
    }
}

impl Drop for RevealScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
