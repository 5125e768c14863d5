//! Seat label codec.
//!
//! Translates between human-facing seat labels (`"a1"` .. `"a20"`) and the
//! compact bit-per-seat representation the ledger stores.
//!
//! # Label format
//!
//! A label is exactly one row letter followed immediately by a decimal ordinal:
//!
//! ```text
//! a7    A7    a07     -> seat index 6
//! a0    a21   a-1     -> InvalidFormat (ordinal out of range / not digits)
//! a12x  " a1" a       -> InvalidFormat (trailing garbage / whitespace / too short)
//! ```
//!
//! The row letter is case-insensitive. Leading zeros in the ordinal are accepted;
//! signs and whitespace are not.
//!
//! # Example
//!
//! ```
//! use cinema_booking_core::seat::{encode_seats, SeatMask};
//!
//! let mask = encode_seats(["a1", "A3"]).unwrap();
//! assert_eq!(mask.set_labels(), vec!["a1", "a3"]);
//! assert_eq!(mask.clear_labels().len(), 18);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of seats in every show.
pub const SEAT_COUNT: usize = 20;

/// The single recognised row letter (lowercase form).
pub const ROW_PREFIX: char = 'a';

const _: () = assert!(SEAT_COUNT <= u32::BITS as usize);

/// Mask with every seat bit set.
const FULL_MASK: u32 = if SEAT_COUNT == u32::BITS as usize {
    u32::MAX
} else {
    (1u32 << SEAT_COUNT) - 1
};

/// Errors produced while parsing or encoding seat labels.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeatError {
    /// The label is not a well-formed, in-range seat label.
    #[error("Invalid seat label: {0}")]
    InvalidFormat(String),

    /// The label appears more than once in the same request.
    #[error("Duplicate seat label: {0}")]
    Duplicate(String),
}

// ============================================================================
// Seat Index
// ============================================================================

/// Zero-based seat index in `[0, SEAT_COUNT)`.
///
/// Only constructible for in-range values, so formatting an index back into a
/// label can never fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SeatIndex(u8);

impl SeatIndex {
    /// Create an index, returning `None` when `index >= SEAT_COUNT`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // SEAT_COUNT <= 32
    pub const fn new(index: usize) -> Option<Self> {
        if index < SEAT_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// The zero-based index value.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0 as usize
    }

    /// The single-bit mask for this seat.
    #[must_use]
    pub const fn bit(self) -> u32 {
        1u32 << self.0
    }

    /// Iterate every seat index in ascending order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..SEAT_COUNT as u8).map(Self)
    }
}

impl TryFrom<u8> for SeatIndex {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(usize::from(value)).ok_or_else(|| format!("seat index {value} out of range"))
    }
}

impl From<SeatIndex> for u8 {
    fn from(index: SeatIndex) -> Self {
        index.0
    }
}

impl fmt::Display for SeatIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ROW_PREFIX}{}", self.get() + 1)
    }
}

// ============================================================================
// Seat Mask
// ============================================================================

/// A set of seats, one bit per seat index.
///
/// Bit `i` set means seat index `i` is a member. Bits at or above
/// [`SEAT_COUNT`] are never set; deserializing such bits is an error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct SeatMask(u32);

impl SeatMask {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Every seat.
    pub const FULL: Self = Self(FULL_MASK);

    /// Build a mask from raw bits, discarding bits outside the seat range.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits & FULL_MASK)
    }

    /// Raw bit representation.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether no seat is in the set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of seats in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether `index` is in the set.
    #[must_use]
    pub const fn contains(self, index: SeatIndex) -> bool {
        self.0 & index.bit() != 0
    }

    /// Whether the two sets share at least one seat.
    #[must_use]
    pub const fn overlaps(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Set union.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Seats in `self` that are also in `other`.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Return a copy with `index` added.
    #[must_use]
    pub const fn with(self, index: SeatIndex) -> Self {
        Self(self.0 | index.bit())
    }

    /// Indices of the set bits, ascending.
    pub fn set_indices(self) -> impl Iterator<Item = SeatIndex> {
        SeatIndex::all().filter(move |index| self.contains(*index))
    }

    /// Indices of the clear bits, ascending.
    pub fn clear_indices(self) -> impl Iterator<Item = SeatIndex> {
        SeatIndex::all().filter(move |index| !self.contains(*index))
    }

    /// Labels for the set bits, ascending by index (booked view when used
    /// on a committed mask).
    #[must_use]
    pub fn set_labels(self) -> Vec<String> {
        self.set_indices().map(format_seat).collect()
    }

    /// Labels for the clear bits, ascending by index (available view when
    /// used on a committed mask).
    #[must_use]
    pub fn clear_labels(self) -> Vec<String> {
        self.clear_indices().map(format_seat).collect()
    }
}

impl TryFrom<u32> for SeatMask {
    type Error = String;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        if bits & !FULL_MASK == 0 {
            Ok(Self(bits))
        } else {
            Err(format!("seat mask {bits:#x} has bits outside {SEAT_COUNT} seats"))
        }
    }
}

impl From<SeatMask> for u32 {
    fn from(mask: SeatMask) -> Self {
        mask.0
    }
}

impl FromIterator<SeatIndex> for SeatMask {
    fn from_iter<T: IntoIterator<Item = SeatIndex>>(iter: T) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl fmt::Display for SeatMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.set_labels().join(", "))
    }
}

// ============================================================================
// Codec
// ============================================================================

/// Parse a single seat label into its zero-based index.
///
/// # Errors
///
/// Returns [`SeatError::InvalidFormat`] if the label does not start with the
/// row letter, if the remainder is not made entirely of ASCII digits, or if
/// the ordinal is outside `[1, SEAT_COUNT]` (overflow included).
pub fn parse_seat(label: &str) -> Result<SeatIndex, SeatError> {
    let invalid = || SeatError::InvalidFormat(label.to_string());

    let ordinal = label
        .strip_prefix(|c: char| c.eq_ignore_ascii_case(&ROW_PREFIX))
        .ok_or_else(invalid)?;

    if ordinal.is_empty() || !ordinal.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let ordinal: usize = ordinal.parse().map_err(|_| invalid())?;
    ordinal
        .checked_sub(1)
        .and_then(SeatIndex::new)
        .ok_or_else(invalid)
}

/// Format a seat index as its canonical (lowercase) label.
#[must_use]
pub fn format_seat(index: SeatIndex) -> String {
    index.to_string()
}

/// Encode an ordered list of labels into a request mask.
///
/// Labels are checked in input order; the first failure wins. Duplicates are
/// detected only against seats earlier in the same list.
///
/// An empty input yields [`SeatMask::EMPTY`]; callers that forbid empty
/// requests check for it before encoding.
///
/// # Errors
///
/// Returns [`SeatError::InvalidFormat`] naming the first unparseable label, or
/// [`SeatError::Duplicate`] naming the first label whose seat was already
/// requested earlier in the list.
pub fn encode_seats<I, S>(labels: I) -> Result<SeatMask, SeatError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    labels.into_iter().try_fold(SeatMask::EMPTY, |mask, label| {
        let label = label.as_ref();
        let index = parse_seat(label)?;
        if mask.contains(index) {
            return Err(SeatError::Duplicate(label.to_string()));
        }
        Ok(mask.with(index))
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn index(i: usize) -> SeatIndex {
        SeatIndex::new(i).unwrap()
    }

    #[test]
    fn test_parse_first_and_last_seat() {
        assert_eq!(parse_seat("a1"), Ok(index(0)));
        assert_eq!(parse_seat("a20"), Ok(index(19)));
    }

    #[test]
    fn test_parse_uppercase_prefix() {
        assert_eq!(parse_seat("A5"), Ok(index(4)));
    }

    #[test]
    fn test_parse_leading_zero() {
        assert_eq!(parse_seat("a007"), Ok(index(6)));
    }

    #[test]
    fn test_parse_rejects_malformed_labels() {
        for label in [
            "", "a", "1", "b1", "aa1", "a0", "a21", "a12x", "a 1", " a1", "a1 ", "a+1", "a-1",
            "a1.0", "a99999999999999999999999", "é1",
        ] {
            assert_eq!(
                parse_seat(label),
                Err(SeatError::InvalidFormat(label.to_string())),
                "label {label:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_format_is_lowercase_and_one_based() {
        assert_eq!(format_seat(index(0)), "a1");
        assert_eq!(format_seat(index(19)), "a20");
    }

    #[test]
    fn test_round_trip_every_index() {
        for seat in SeatIndex::all() {
            assert_eq!(parse_seat(&format_seat(seat)), Ok(seat));
        }
    }

    #[test]
    fn test_seat_index_bounds() {
        assert!(SeatIndex::new(SEAT_COUNT - 1).is_some());
        assert!(SeatIndex::new(SEAT_COUNT).is_none());
        assert_eq!(SeatIndex::all().len(), SEAT_COUNT);
    }

    #[test]
    fn test_encode_builds_mask() {
        let mask = encode_seats(["a1", "a2", "a20"]).unwrap();
        assert_eq!(mask.bits(), 0b1000_0000_0000_0000_0011);
        assert_eq!(mask.len(), 3);
    }

    #[test]
    fn test_encode_empty_is_empty_mask() {
        let mask = encode_seats(Vec::<String>::new()).unwrap();
        assert!(mask.is_empty());
    }

    #[test]
    fn test_encode_reports_duplicate() {
        assert_eq!(
            encode_seats(["a1", "a1"]),
            Err(SeatError::Duplicate("a1".to_string()))
        );
    }

    #[test]
    fn test_encode_duplicate_across_case_names_second_label() {
        assert_eq!(
            encode_seats(["a3", "A3"]),
            Err(SeatError::Duplicate("A3".to_string()))
        );
    }

    #[test]
    fn test_encode_first_error_wins() {
        // Invalid label comes before the duplicate.
        assert_eq!(
            encode_seats(["a2", "zz", "a2"]),
            Err(SeatError::InvalidFormat("zz".to_string()))
        );
        // Duplicate comes before the invalid label.
        assert_eq!(
            encode_seats(["a2", "a2", "zz"]),
            Err(SeatError::Duplicate("a2".to_string()))
        );
    }

    #[test]
    fn test_labels_views_are_ascending_and_complementary() {
        let mask = encode_seats(["a10", "a2", "a7"]).unwrap();
        assert_eq!(mask.set_labels(), vec!["a2", "a7", "a10"]);

        let clear = mask.clear_labels();
        assert_eq!(clear.len(), SEAT_COUNT - 3);
        assert_eq!(clear.first().map(String::as_str), Some("a1"));
        assert!(!clear.contains(&"a7".to_string()));
    }

    #[test]
    fn test_mask_set_operations() {
        let a = encode_seats(["a1", "a2"]).unwrap();
        let b = encode_seats(["a2", "a3"]).unwrap();
        let c = encode_seats(["a4"]).unwrap();

        assert!(a.overlaps(b));
        assert!(!a.overlaps(c));
        assert_eq!(a.union(c).len(), 3);
        assert_eq!(a.intersection(b).set_labels(), vec!["a2"]);
    }

    #[test]
    fn test_from_bits_discards_out_of_range_bits() {
        let mask = SeatMask::from_bits(u32::MAX);
        assert_eq!(mask, SeatMask::FULL);
        assert_eq!(mask.len(), SEAT_COUNT);
    }

    #[test]
    fn test_display() {
        let mask = encode_seats(["a3", "a1"]).unwrap();
        assert_eq!(mask.to_string(), "[a1, a3]");
        assert_eq!(SeatMask::EMPTY.to_string(), "[]");
    }

    #[test]
    fn test_deserialize_rejects_bits_outside_the_seat_range() {
        let out_of_range = toml::Value::Integer(i64::from(u32::MAX));
        assert!(out_of_range.try_into::<SeatMask>().is_err());

        let seat_21 = toml::Value::Integer(1 << SEAT_COUNT);
        assert!(seat_21.try_into::<SeatMask>().is_err());

        let full = toml::Value::Integer(i64::from(SeatMask::FULL.bits()));
        let mask: SeatMask = full.try_into().unwrap();
        assert_eq!(mask, SeatMask::FULL);
        assert!(mask.clear_labels().is_empty());
    }

    #[test]
    fn test_serialized_mask_is_its_bits() {
        let mask = encode_seats(["a1", "a3"]).unwrap();
        assert_eq!(toml::Value::try_from(mask).unwrap(), toml::Value::Integer(0b101));
    }
}
