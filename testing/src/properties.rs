//! Property-based testing utilities using proptest.
//!
//! Strategies for seat indices, labels (valid and invalid) and claim
//! requests.

use cinema_booking_core::{SEAT_COUNT, SeatIndex, SeatMask, format_seat};
use proptest::prelude::*;
use proptest::sample::subsequence;

/// Any in-range seat index.
pub fn seat_index() -> impl Strategy<Value = SeatIndex> {
    (0..SEAT_COUNT).prop_filter_map("seat index in range", SeatIndex::new)
}

/// A valid label, with the row letter in either case and optional leading zeros.
pub fn seat_label() -> impl Strategy<Value = String> {
    (seat_index(), any::<bool>(), 0..3usize).prop_map(|(index, upper, zeros)| {
        let canonical = format_seat(index);
        let (row, ordinal) = canonical.split_at(1);
        let row = if upper {
            row.to_ascii_uppercase()
        } else {
            row.to_string()
        };
        format!("{row}{}{ordinal}", "0".repeat(zeros))
    })
}

/// A label that must be rejected as malformed.
pub fn invalid_label() -> impl Strategy<Value = String> {
    prop_oneof![
        // wrong row letter
        "[b-zB-Z][1-9][0-9]?",
        // ordinal out of range
        "[aA](0|2[1-9]|[3-9][0-9]|[1-9][0-9]{2,6})",
        // trailing garbage, signs, whitespace
        "[aA][1-9][a-z .]{1,3}",
        "[aA][+-][1-9]",
        " [aA][1-9]",
        // too short
        "[aA]?",
    ]
}

/// A non-empty list of distinct canonical labels in random order.
pub fn claim_request() -> impl Strategy<Value = Vec<String>> {
    let every: Vec<String> = SeatIndex::all().map(format_seat).collect();
    subsequence(every, 1..=SEAT_COUNT).prop_shuffle()
}

/// Any seat mask, as might be committed on a show.
pub fn seat_mask() -> impl Strategy<Value = SeatMask> {
    any::<u32>().prop_map(SeatMask::from_bits)
}
