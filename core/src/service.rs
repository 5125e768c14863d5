//! Booking service: the catalog plus one seat ledger cell per show.
//!
//! This is what callers (the CLI, tests) hold. Catalog lookups are delegated
//! to [`Catalog`]; seat operations go through the lock-free [`SeatLedger`].
//! The service is `Sync`, so share it across threads with `Arc`.

use crate::catalog::{Catalog, Movie, MovieId, Theater, TheaterId};
use crate::error::BookingError;
use crate::ledger::{Claim, SeatLedger, ShowId};

/// In-memory booking service with concurrency-safe seat reservation.
#[derive(Debug)]
pub struct BookingService {
    catalog: Catalog,
    ledger: SeatLedger,
}

impl BookingService {
    /// Register a ledger cell for every show in `catalog`.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        let ledger = SeatLedger::new(catalog.units_known_at_startup());
        Self { catalog, ledger }
    }

    /// The catalog this service was built from.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The underlying seat ledger.
    #[must_use]
    pub const fn ledger(&self) -> &SeatLedger {
        &self.ledger
    }

    /// All movies.
    #[must_use]
    pub fn list_movies(&self) -> &[Movie] {
        self.catalog.list_movies()
    }

    /// Theaters showing `movie_id`, ascending by id.
    #[must_use]
    pub fn list_theaters_for_movie(&self, movie_id: MovieId) -> Vec<&Theater> {
        self.catalog.list_theaters_for_movie(movie_id)
    }

    /// The show for a (movie, theater) pair, if one exists.
    #[must_use]
    pub fn find_show(&self, movie_id: MovieId, theater_id: TheaterId) -> Option<ShowId> {
        self.catalog.find_show(movie_id, theater_id)
    }

    /// Free seats of a show, ascending.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::NotFound`] for an unknown show.
    pub fn list_available_seats(&self, show_id: ShowId) -> Result<Vec<String>, BookingError> {
        self.ledger.available(show_id)
    }

    /// Booked seats of a show, ascending.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::NotFound`] for an unknown show.
    pub fn list_booked_seats(&self, show_id: ShowId) -> Result<Vec<String>, BookingError> {
        self.ledger.booked(show_id)
    }

    /// Book every listed seat, or none of them.
    ///
    /// # Errors
    ///
    /// See [`SeatLedger::claim`].
    pub fn book_seats<S: AsRef<str>>(
        &self,
        show_id: ShowId,
        seat_labels: &[S],
    ) -> Result<Claim, BookingError> {
        self.ledger.claim(show_id, seat_labels)
    }
}

impl Default for BookingService {
    fn default() -> Self {
        Self::new(Catalog::reference())
    }
}
