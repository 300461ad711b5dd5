//! In-process deduplication of preparation attempts.
//!
//! The [`LockCoordinator`] serializes processes; the [`PreparationGate`]
//! serializes callers inside one process. The first caller starts a
//! coordinator run on the runtime and parks its outcome in a single slot;
//! callers arriving while it is in flight attach to that same outcome. The
//! slot is emptied when the run settles, so the next call starts over.

use super::coordinator::LockCoordinator;
use super::prepare::AssetPreparer;
use crate::core::PreparationFailed;
use anyhow::Result;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;
use tracing::debug;

type Outcome = Result<(), PreparationFailed>;
type InFlight = Shared<BoxFuture<'static, Outcome>>;
type Slot = Arc<Mutex<Option<InFlight>>>;

/// Single-slot memo of the in-flight preparation attempt.
pub struct PreparationGate<P> {
    coordinator: Arc<LockCoordinator<P>>,
    in_flight: Slot,
    attempts: AtomicUsize,
}

impl<P: AssetPreparer> PreparationGate<P> {
    #[must_use]
    pub fn new(coordinator: LockCoordinator<P>) -> Self {
        Self {
            coordinator: Arc::new(coordinator),
            in_flight: Arc::new(Mutex::new(None)),
            attempts: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn coordinator(&self) -> &LockCoordinator<P> {
        &self.coordinator
    }

    /// Number of coordinator runs this gate has started.
    #[must_use]
    pub fn attempts_started(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Wait for the assets to be prepared, joining an attempt already in
    /// flight in this process if there is one.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`PreparationFailed`] (as `anyhow::Error`) when the attempt
    /// fails; every caller that joined the attempt gets the same failure.
    pub async fn ensure(&self) -> Result<()> {
        let in_flight = self.join_or_start();
        in_flight.await.map_err(anyhow::Error::new)
    }

    fn join_or_start(&self) -> InFlight {
        let (sender, in_flight) = {
            let mut slot = lock_slot(&self.in_flight);
            if let Some(existing) = slot.as_ref() {
                debug!("Joining in-flight asset preparation");
                return existing.clone();
            }

            let (sender, receiver) = oneshot::channel::<Outcome>();
            let in_flight: InFlight = receiver
                .map(|received| {
                    received.unwrap_or_else(|_| {
                        Err(PreparationFailed(Arc::new(anyhow::anyhow!(
                            "Asset preparation ended without reporting an outcome"
                        ))))
                    })
                })
                .boxed()
                .shared();
            *slot = Some(in_flight.clone());
            (sender, in_flight)
        };

        self.attempts.fetch_add(1, Ordering::SeqCst);
        let coordinator = Arc::clone(&self.coordinator);
        let clear = ClearOnSettle(Arc::clone(&self.in_flight));
        tokio::spawn(async move {
            let outcome = coordinator.run().await.map_err(|e| PreparationFailed(Arc::new(e)));
            // Empty the slot before anyone can observe the outcome, so a
            // caller that sees it settled always starts a fresh attempt.
            drop(clear);
            let _ = sender.send(outcome);
        });

        in_flight
    }
}

/// Empties the slot when dropped, including when the attempt panics or is
/// dropped by a shutting-down runtime before it ever runs.
struct ClearOnSettle(Slot);

impl Drop for ClearOnSettle {
    fn drop(&mut self) {
        lock_slot(&self.0).take();
    }
}

fn lock_slot(slot: &Mutex<Option<InFlight>>) -> MutexGuard<'_, Option<InFlight>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
