//! Error types for booking operations.

use crate::ledger::ShowId;
use crate::seat::SeatError;
use thiserror::Error;

/// Why a booking call did not commit any seats.
///
/// Every variant guarantees that the call left the show's committed seats
/// unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// The show id was never registered with the ledger.
    #[error("Invalid show id: {0}")]
    NotFound(ShowId),

    /// The request named no seats.
    #[error("No seats provided")]
    EmptyRequest,

    /// A seat label was malformed or out of range.
    #[error("Invalid seat label: {0}")]
    InvalidFormat(String),

    /// A seat label appeared twice in the same request.
    #[error("Duplicate seat label: {0}")]
    Duplicate(String),

    /// At least one requested seat was already committed.
    ///
    /// Recoverable by choosing different seats.
    #[error("One or more seats already booked")]
    AlreadyBooked,
}

impl BookingError {
    /// Whether the request itself was malformed (detected before any shared
    /// state was read).
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyRequest | Self::InvalidFormat(_) | Self::Duplicate(_)
        )
    }

    /// Whether the request lost to seats committed by another booking.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyBooked)
    }

    /// Short, stable outcome name used as a metrics label.
    #[must_use]
    pub const fn outcome(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::EmptyRequest | Self::InvalidFormat(_) | Self::Duplicate(_) => "rejected",
            Self::AlreadyBooked => "already_booked",
        }
    }
}

impl From<SeatError> for BookingError {
    fn from(error: SeatError) -> Self {
        match error {
            SeatError::InvalidFormat(label) => Self::InvalidFormat(label),
            SeatError::Duplicate(label) => Self::Duplicate(label),
        }
    }
}
