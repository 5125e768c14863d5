//! # Cinema Booking Testing
//!
//! Testing utilities and helpers for cinema seat booking.
//!
//! This crate provides:
//! - Fixtures for ledgers, labels and the reference catalog
//! - A Given-When-Then harness for single claims ([`ClaimTest`])
//! - A barrier-synchronised harness for racing concurrent claims ([`race`])
//! - Property-based testing strategies ([`properties`])
//!
//! ## Example
//!
//! ```
//! use cinema_booking_core::BookingError;
//! use cinema_booking_testing::ClaimTest;
//!
//! ClaimTest::new()
//!     .when_claim(&["a1", "a1"])
//!     .then_rejected(BookingError::Duplicate("a1".to_string()))
//!     .run();
//! ```

pub mod fixtures;
pub mod properties;
pub mod race;

// Re-export commonly used items
pub use claim_test::{ClaimTest, assertions};
pub use fixtures::{TEST_SHOW, all_labels, labels, reference_service, single_show_ledger};
pub use race::{claimed_count, race_claims, race_claims_on_threads};
