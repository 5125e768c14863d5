//! Concurrent claim harnesses.
//!
//! [`race_claims`] spawns one task per request on the current Tokio runtime,
//! lines them all up on a barrier, and releases them together. Overlap is
//! bounded by the runtime's worker count, so use it from a multi-threaded test
//! runtime:
//!
//! ```
//! use cinema_booking_core::{SeatLedger, ShowId};
//! use cinema_booking_testing::race::race_claims;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "multi_thread", worker_threads = 4)]
//! # async fn main() -> Result<(), tokio::task::JoinError> {
//! let show = ShowId::new(1);
//! let ledger = Arc::new(SeatLedger::new([show]));
//!
//! let outcomes = race_claims(&ledger, vec![(show, vec!["a10".into()]); 4]).await?;
//! assert_eq!(outcomes.iter().filter(|o| o.is_ok()).count(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! [`race_claims_on_threads`] gives every request its own OS thread, so all
//! callers are preemptible and run truly in parallel.

use cinema_booking_core::{BookingError, Claim, SeatLedger, ShowId};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use tokio::sync::Barrier;
use tokio::task::JoinError;

/// One claim request: the show and the labels to claim on it.
pub type ClaimRequest = (ShowId, Vec<String>);

/// Run every request concurrently and return the outcomes in request order.
///
/// # Errors
///
/// Returns the [`JoinError`] of the first task that panicked or was cancelled.
pub async fn race_claims(
    ledger: &Arc<SeatLedger>,
    requests: Vec<ClaimRequest>,
) -> Result<Vec<Result<Claim, BookingError>>, JoinError> {
    let barrier = Arc::new(Barrier::new(requests.len().max(1)));

    let handles: Vec<_> = requests
        .into_iter()
        .map(|(show_id, labels)| {
            let ledger = Arc::clone(ledger);
            let barrier = Arc::clone(&barrier);
            tokio::spawn(async move {
                barrier.wait().await;
                ledger.claim(show_id, &labels)
            })
        })
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for handle in handles {
        outcomes.push(handle.await?);
    }
    Ok(outcomes)
}

/// Run every request on its own OS thread and return the outcomes in request
/// order.
///
/// Threads meet on a [`std::sync::Barrier`], then spin until all of them are
/// through it, so the claims start within a few hundred nanoseconds of each
/// other.
///
/// # Errors
///
/// Returns the panic payload of the first thread that panicked.
pub fn race_claims_on_threads(
    ledger: &SeatLedger,
    requests: Vec<ClaimRequest>,
) -> thread::Result<Vec<Result<Claim, BookingError>>> {
    let callers = requests.len();
    let barrier = std::sync::Barrier::new(callers.max(1));
    let released = AtomicUsize::new(0);

    thread::scope(|scope| {
        let handles: Vec<_> = requests
            .into_iter()
            .map(|(show_id, labels)| {
                let barrier = &barrier;
                let released = &released;
                scope.spawn(move || {
                    barrier.wait();
                    released.fetch_add(1, Ordering::AcqRel);
                    while released.load(Ordering::Acquire) < callers {
                        std::hint::spin_loop();
                        thread::yield_now();
                    }
                    ledger.claim(show_id, &labels)
                })
            })
            .collect();

        handles.into_iter().map(thread::ScopedJoinHandle::join).collect()
    })
}

/// Count the successful claims in a set of outcomes.
#[must_use]
pub fn claimed_count(outcomes: &[Result<Claim, BookingError>]) -> usize {
    outcomes.iter().filter(|outcome| outcome.is_ok()).count()
}
