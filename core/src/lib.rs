//! # Cinema Booking Core
//!
//! Lock-free, all-or-nothing seat reservation for cinema shows.
//!
//! ## Components
//!
//! - **Seat codec** ([`seat`]): validating translation between seat labels
//!   (`"a1"` .. `"a20"`) and a bit-per-seat [`SeatMask`]
//! - **Seat ledger** ([`ledger`]): one atomic committed mask per show, with a
//!   compare-and-set claim that commits every requested seat or none
//! - **Catalog** ([`catalog`]): immutable movies, theaters and shows
//! - **Booking service** ([`service`]): the catalog wired to a ledger
//!
//! ## Data flow
//!
//! ```text
//! labels ──▶ encode_seats ──▶ request mask ──▶ CAS merge into committed mask
//!              │ InvalidFormat / Duplicate         │ AlreadyBooked (nothing written)
//!              ▼                                   ▼
//!           rejected before shared state        Claimed
//! ```
//!
//! ## Example
//!
//! ```
//! use cinema_booking_core::{BookingError, BookingService, MovieId, TheaterId};
//!
//! let service = BookingService::default();
//! let show = service.find_show(MovieId::new(1), TheaterId::new(1)).unwrap();
//!
//! service.book_seats(show, &["a1", "a2", "a3"]).unwrap();
//! assert_eq!(
//!     service.book_seats(show, &["a1", "a4"]),
//!     Err(BookingError::AlreadyBooked)
//! );
//! assert!(service.list_available_seats(show).unwrap().contains(&"a4".to_string()));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod ledger;
pub mod seat;
pub mod service;

pub use catalog::{Catalog, CatalogError, Movie, MovieId, Show, Theater, TheaterId};
pub use error::BookingError;
pub use ledger::{Claim, SeatLedger, ShowId, ShowSeats};
pub use seat::{
    ROW_PREFIX, SEAT_COUNT, SeatError, SeatIndex, SeatMask, encode_seats, format_seat, parse_seat,
};
pub use service::BookingService;
