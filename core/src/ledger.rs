//! Reservation ledger: one lock-free seat bitmask per show.
//!
//! Each registered show owns an independent [`ShowSeats`] cell holding its
//! committed mask in an `AtomicU32`. Claims are merged into that mask with a
//! compare-and-set loop, so:
//!
//! - two overlapping requests can never both succeed,
//! - a request that touches any already-committed seat commits nothing,
//! - shows never contend with each other,
//! - no lock is held while a claim retries.
//!
//! # Claim algorithm
//!
//! ```text
//! current = committed.load()
//! loop {
//!     if current & request != 0 { return AlreadyBooked }      // nothing written
//!     match committed.cas(current, current | request) {
//!         Ok(_)       => return Claimed,
//!         Err(latest) => current = latest,                     // someone else won, re-check
//!     }
//! }
//! ```
//!
//! A failed compare-and-set means another claim on the same show committed,
//! and the committed mask only ever grows, so the loop always terminates.
//!
//! The set of shows is fixed when the ledger is built. The map is never
//! mutated afterwards, so `&ShowSeats` handles stay valid for as long as the
//! ledger is borrowed; share the ledger across threads with `Arc`.

use crate::error::BookingError;
use crate::seat::{SeatMask, encode_seats};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

// ============================================================================
// Identifiers
// ============================================================================

/// Identifier of a bookable show.
///
/// Supplied by the catalog; the ledger never generates one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShowId(u32);

impl ShowId {
    /// Create a `ShowId` from its raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ShowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Per-show cell
// ============================================================================

/// Committed seats of a single show.
///
/// Not `Clone`: the atomic is the single source of truth for the show and is
/// only ever reached through a reference.
#[derive(Debug, Default)]
pub struct ShowSeats {
    committed: AtomicU32,
}

impl ShowSeats {
    /// A show with every seat available.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            committed: AtomicU32::new(0),
        }
    }

    /// One consistent read of the committed mask.
    #[must_use]
    pub fn snapshot(&self) -> SeatMask {
        SeatMask::from_bits(self.committed.load(Ordering::Acquire))
    }

    /// Atomically commit every seat in `request`, or none of them.
    ///
    /// Returns the number of compare-and-set attempts on success. A strong
    /// exchange is used, so a count above 1 always means another writer
    /// committed in between.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::AlreadyBooked`] if any seat in `request` was
    /// committed at the moment of the decisive check. The committed mask is
    /// left untouched in that case.
    pub fn try_claim(&self, request: SeatMask) -> Result<u32, BookingError> {
        let request = request.bits();
        let mut current = self.committed.load(Ordering::Acquire);
        let mut attempts = 0u32;

        loop {
            if current & request != 0 {
                return Err(BookingError::AlreadyBooked);
            }

            attempts = attempts.saturating_add(1);
            match self.committed.compare_exchange(
                current,
                current | request,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Ok(attempts),
                Err(latest) => {
                    metrics::counter!("booking.claim_retries").increment(1);
                    current = latest;
                }
            }
        }
    }
}

// ============================================================================
// Ledger
// ============================================================================

/// Successful claim receipt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Claim {
    /// Show the seats were committed on.
    pub show_id: ShowId,
    /// Seats committed by this claim.
    pub seats: SeatMask,
    /// Compare-and-set attempts it took (1 = uncontended).
    pub attempts: u32,
}

/// One [`ShowSeats`] cell per show registered at construction.
#[derive(Debug, Default)]
pub struct SeatLedger {
    shows: HashMap<ShowId, ShowSeats>,
}

impl SeatLedger {
    /// Register one empty cell per show id. Repeated ids collapse into one.
    #[must_use]
    pub fn new(show_ids: impl IntoIterator<Item = ShowId>) -> Self {
        let shows: HashMap<_, _> = show_ids
            .into_iter()
            .map(|id| (id, ShowSeats::new()))
            .collect();
        tracing::info!(shows = shows.len(), "Seat ledger initialized");
        Self { shows }
    }

    /// Number of registered shows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shows.len()
    }

    /// Whether no show is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shows.is_empty()
    }

    /// Registered show ids, ascending.
    #[must_use]
    pub fn show_ids(&self) -> Vec<ShowId> {
        let mut ids: Vec<_> = self.shows.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Resolve a show id to its cell.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::NotFound`] if the id was not registered.
    pub fn lookup(&self, show_id: ShowId) -> Result<&ShowSeats, BookingError> {
        self.shows
            .get(&show_id)
            .ok_or(BookingError::NotFound(show_id))
    }

    /// Committed seats of a show, read once.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::NotFound`] if the id was not registered.
    pub fn snapshot(&self, show_id: ShowId) -> Result<SeatMask, BookingError> {
        Ok(self.lookup(show_id)?.snapshot())
    }

    /// Labels of the seats still free, ascending.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::NotFound`] if the id was not registered.
    pub fn available(&self, show_id: ShowId) -> Result<Vec<String>, BookingError> {
        Ok(self.snapshot(show_id)?.clear_labels())
    }

    /// Labels of the committed seats, ascending.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::NotFound`] if the id was not registered.
    pub fn booked(&self, show_id: ShowId) -> Result<Vec<String>, BookingError> {
        Ok(self.snapshot(show_id)?.set_labels())
    }

    /// Claim every listed seat on a show, or none of them.
    ///
    /// Validation (empty list, malformed labels, duplicates) happens before the
    /// show's committed mask is read.
    ///
    /// # Errors
    ///
    /// - [`BookingError::NotFound`] if the show is unknown
    /// - [`BookingError::EmptyRequest`] if `labels` is empty
    /// - [`BookingError::InvalidFormat`] / [`BookingError::Duplicate`] for the
    ///   first bad label
    /// - [`BookingError::AlreadyBooked`] if any seat was already committed
    pub fn claim<S: AsRef<str>>(
        &self,
        show_id: ShowId,
        labels: &[S],
    ) -> Result<Claim, BookingError> {
        let result = self.try_claim_labels(show_id, labels);

        match &result {
            Ok(claim) => {
                metrics::counter!("booking.claims", "outcome" => "claimed").increment(1);
                tracing::debug!(
                    show_id = %show_id,
                    seats = %claim.seats,
                    attempts = claim.attempts,
                    "Seats claimed"
                );
            }
            Err(error) => {
                metrics::counter!("booking.claims", "outcome" => error.outcome()).increment(1);
                tracing::debug!(show_id = %show_id, %error, "Claim rejected");
            }
        }

        result
    }

    fn try_claim_labels<S: AsRef<str>>(
        &self,
        show_id: ShowId,
        labels: &[S],
    ) -> Result<Claim, BookingError> {
        let cell = self.lookup(show_id)?;
        if labels.is_empty() {
            return Err(BookingError::EmptyRequest);
        }
        let request = encode_seats(labels)?;
        let attempts = cell.try_claim(request)?;

        Ok(Claim {
            show_id,
            seats: request,
            attempts,
        })
    }
}
