//! Last-navigation-wins supersession of in-flight access checks.

use std::future::Future;

use tokio::sync::watch;

/// Sequences navigations for one navigation context, such as one session.
///
/// Each navigation takes a ticket. Starting a newer navigation abandons any
/// check still running under an older ticket.
#[derive(Debug)]
pub struct NavigationGate {
    latest: watch::Sender<u64>,
}

impl NavigationGate {
    /// Creates a gate with no navigation in flight.
    #[must_use]
    pub fn new() -> Self {
        let (latest, _) = watch::channel(0);
        Self { latest }
    }

    /// Starts a navigation, superseding every earlier one.
    #[must_use]
    pub fn begin(&self) -> NavigationTicket {
        let mut id = 0;
        self.latest.send_modify(|latest| {
            *latest += 1;
            id = *latest;
        });

        NavigationTicket {
            id,
            receiver: self.latest.subscribe(),
        }
    }

    /// Returns whether `ticket` is the most recent navigation.
    #[must_use]
    pub fn is_current(&self, ticket: &NavigationTicket) -> bool {
        *self.latest.borrow() == ticket.id
    }
}

impl Default for NavigationGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for one navigation started on a [`NavigationGate`].
#[derive(Debug)]
pub struct NavigationTicket {
    id: u64,
    receiver: watch::Receiver<u64>,
}

/// Outcome of a check run under a navigation ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome<T> {
    /// The check finished while its navigation was still current.
    Completed(T),
    /// A newer navigation started first; the check was abandoned.
    Superseded,
}

impl NavigationTicket {
    /// Returns the ticket's sequence number.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Drives `check` until it finishes or a newer navigation starts.
    pub async fn run<F>(mut self, check: F) -> NavigationOutcome<F::Output>
    where
        F: Future,
    {
        let id = self.id;
        tokio::select! {
            biased;
            () = wait_until_superseded(&mut self.receiver, id) => NavigationOutcome::Superseded,
            output = check => NavigationOutcome::Completed(output),
        }
    }
}

async fn wait_until_superseded(receiver: &mut watch::Receiver<u64>, id: u64) {
    loop {
        if receiver.changed().await.is_err() {
            // The gate is gone, so nothing can supersede this navigation.
            std::future::pending::<()>().await;
        }

        if *receiver.borrow_and_update() != id {
            return;
        }
    }
}
