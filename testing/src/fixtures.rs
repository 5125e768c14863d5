//! Test data builders.

use cinema_booking_core::{BookingService, Catalog, SEAT_COUNT, SeatLedger, ShowId};

/// Show id used by single-show fixtures.
pub const TEST_SHOW: ShowId = ShowId::new(1);

/// Owned labels from string literals.
#[must_use]
pub fn labels(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|label| (*label).to_string()).collect()
}

/// Every canonical label, `a1` through `a20`, ascending.
#[must_use]
pub fn all_labels() -> Vec<String> {
    (1..=SEAT_COUNT).map(|n| format!("a{n}")).collect()
}

/// A ledger with a single fresh show, [`TEST_SHOW`].
#[must_use]
pub fn single_show_ledger() -> SeatLedger {
    SeatLedger::new([TEST_SHOW])
}

/// A ledger with `count` fresh shows, ids `1..=count`.
#[must_use]
pub fn multi_show_ledger(count: u32) -> SeatLedger {
    SeatLedger::new((1..=count).map(ShowId::new))
}

/// A booking service over the reference catalog.
#[must_use]
pub fn reference_service() -> BookingService {
    BookingService::new(Catalog::reference())
}
