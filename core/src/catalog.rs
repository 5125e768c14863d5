//! Movie, theater and show listings.
//!
//! The catalog is plain read-only data: it is built once (from the reference
//! dataset or a TOML file), validated, and handed to
//! [`BookingService`](crate::service::BookingService), which registers one
//! ledger cell per show. Nothing in the catalog is mutable after construction.
//!
//! # TOML format
//!
//! ```toml
//! [[movies]]
//! id = 1
//! title = "Inception"
//!
//! [[theaters]]
//! id = 1
//! name = "Central Cinema"
//!
//! [[shows]]
//! id = 1
//! movie_id = 1
//! theater_id = 1
//! ```

use crate::ledger::ShowId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Errors produced while building or loading a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Two movies share an id.
    #[error("Duplicate movie id: {0}")]
    DuplicateMovie(MovieId),

    /// Two theaters share an id.
    #[error("Duplicate theater id: {0}")]
    DuplicateTheater(TheaterId),

    /// Two shows share an id.
    #[error("Duplicate show id: {0}")]
    DuplicateShow(ShowId),

    /// Two shows run the same movie in the same theater.
    #[error("More than one show for movie {movie_id} at theater {theater_id}")]
    DuplicateScreening {
        /// Movie of the conflicting shows
        movie_id: MovieId,
        /// Theater of the conflicting shows
        theater_id: TheaterId,
    },

    /// A show references a movie that is not listed.
    #[error("Show {show_id} references unknown movie {movie_id}")]
    UnknownMovie {
        /// Offending show
        show_id: ShowId,
        /// Missing movie
        movie_id: MovieId,
    },

    /// A show references a theater that is not listed.
    #[error("Show {show_id} references unknown theater {theater_id}")]
    UnknownTheater {
        /// Offending show
        show_id: ShowId,
        /// Missing theater
        theater_id: TheaterId,
    },

    /// The catalog file could not be read.
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not valid TOML for this schema.
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for a movie
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(u32);

impl MovieId {
    /// Create a `MovieId` from its raw value
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw value
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a theater
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TheaterId(u32);

impl TheaterId {
    /// Create a `TheaterId` from its raw value
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw value
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TheaterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Entities
// ============================================================================

/// A movie that can be screened
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Unique movie identifier
    pub id: MovieId,
    /// Human-readable title
    pub title: String,
}

impl Movie {
    /// Creates a new `Movie`
    #[must_use]
    pub fn new(id: u32, title: impl Into<String>) -> Self {
        Self {
            id: MovieId::new(id),
            title: title.into(),
        }
    }
}

/// A theater that hosts shows
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theater {
    /// Unique theater identifier
    pub id: TheaterId,
    /// Human-readable name
    pub name: String,
}

impl Theater {
    /// Creates a new `Theater`
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: TheaterId::new(id),
            name: name.into(),
        }
    }
}

/// A movie screened at a theater; the unit seats are booked against
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    /// Unique show identifier
    pub id: ShowId,
    /// The movie being shown
    pub movie_id: MovieId,
    /// The theater it runs in
    pub theater_id: TheaterId,
}

impl Show {
    /// Creates a new `Show`
    #[must_use]
    pub const fn new(id: u32, movie_id: u32, theater_id: u32) -> Self {
        Self {
            id: ShowId::new(id),
            movie_id: MovieId::new(movie_id),
            theater_id: TheaterId::new(theater_id),
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    movies: Vec<Movie>,
    #[serde(default)]
    theaters: Vec<Theater>,
    #[serde(default)]
    shows: Vec<Show>,
}

/// Validated, immutable set of movies, theaters and shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Catalog {
    movies: Vec<Movie>,
    theaters: Vec<Theater>,
    shows: Vec<Show>,
}

impl Catalog {
    /// Build a catalog, checking referential integrity.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on duplicate ids, a repeated (movie, theater)
    /// pair, or a show that references an unlisted movie or theater.
    pub fn new(
        movies: Vec<Movie>,
        theaters: Vec<Theater>,
        shows: Vec<Show>,
    ) -> Result<Self, CatalogError> {
        let mut movie_ids = HashSet::new();
        for movie in &movies {
            if !movie_ids.insert(movie.id) {
                return Err(CatalogError::DuplicateMovie(movie.id));
            }
        }

        let mut theater_ids = HashSet::new();
        for theater in &theaters {
            if !theater_ids.insert(theater.id) {
                return Err(CatalogError::DuplicateTheater(theater.id));
            }
        }

        let mut show_ids = HashSet::new();
        let mut screenings = HashSet::new();
        for show in &shows {
            if !show_ids.insert(show.id) {
                return Err(CatalogError::DuplicateShow(show.id));
            }
            if !movie_ids.contains(&show.movie_id) {
                return Err(CatalogError::UnknownMovie {
                    show_id: show.id,
                    movie_id: show.movie_id,
                });
            }
            if !theater_ids.contains(&show.theater_id) {
                return Err(CatalogError::UnknownTheater {
                    show_id: show.id,
                    theater_id: show.theater_id,
                });
            }
            if !screenings.insert((show.movie_id, show.theater_id)) {
                return Err(CatalogError::DuplicateScreening {
                    movie_id: show.movie_id,
                    theater_id: show.theater_id,
                });
            }
        }

        Ok(Self {
            movies,
            theaters,
            shows,
        })
    }

    /// The built-in sample dataset: three movies across two theaters.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            movies: vec![
                Movie::new(1, "Inception"),
                Movie::new(2, "Interstellar"),
                Movie::new(3, "The Matrix"),
            ],
            theaters: vec![
                Theater::new(1, "Central Cinema"),
                Theater::new(2, "Mall Theater"),
            ],
            shows: vec![
                Show::new(1, 1, 1), // Inception @ Central
                Show::new(2, 1, 2), // Inception @ Mall
                Show::new(3, 2, 1), // Interstellar @ Central
                Show::new(4, 3, 2), // The Matrix @ Mall
            ],
        }
    }

    /// Parse and validate a TOML catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for malformed input, or any validation
    /// error from [`Catalog::new`].
    pub fn from_toml_str(input: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(input)?;
        Self::new(file.movies, file.theaters, file.shows)
    }

    /// Read, parse and validate a TOML catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, otherwise as
    /// [`Catalog::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_toml_str(&input)
    }

    /// All movies, in declaration order.
    #[must_use]
    pub fn list_movies(&self) -> &[Movie] {
        &self.movies
    }

    /// All shows, in declaration order.
    #[must_use]
    pub fn shows(&self) -> &[Show] {
        &self.shows
    }

    /// Theaters with at least one show of `movie_id`, ascending by id.
    ///
    /// Empty for an unknown movie.
    #[must_use]
    pub fn list_theaters_for_movie(&self, movie_id: MovieId) -> Vec<&Theater> {
        let theater_ids: HashSet<TheaterId> = self
            .shows
            .iter()
            .filter(|show| show.movie_id == movie_id)
            .map(|show| show.theater_id)
            .collect();

        let mut theaters: Vec<&Theater> = self
            .theaters
            .iter()
            .filter(|theater| theater_ids.contains(&theater.id))
            .collect();
        theaters.sort_by_key(|theater| theater.id);
        theaters
    }

    /// The show screening `movie_id` at `theater_id`, if any.
    #[must_use]
    pub fn find_show(&self, movie_id: MovieId, theater_id: TheaterId) -> Option<ShowId> {
        self.shows
            .iter()
            .find(|show| show.movie_id == movie_id && show.theater_id == theater_id)
            .map(|show| show.id)
    }

    /// Every show id, ascending. Used once to register ledger cells.
    #[must_use]
    pub fn units_known_at_startup(&self) -> BTreeSet<ShowId> {
        self.shows.iter().map(|show| show.id).collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_reference_catalog_is_valid() {
        let reference = Catalog::reference();
        let rebuilt = Catalog::new(
            reference.movies.clone(),
            reference.theaters.clone(),
            reference.shows.clone(),
        )
        .unwrap();
        assert_eq!(rebuilt, reference);
    }

    #[test]
    fn test_serialized_catalog_loads_back() {
        let reference = Catalog::reference();
        let text = toml::to_string(&reference).unwrap();

        assert!(text.contains("[[movies]]"));
        assert_eq!(Catalog::from_toml_str(&text).unwrap(), reference);
    }

    #[test]
    fn test_list_movies_in_declaration_order() {
        let catalog = Catalog::reference();
        let titles: Vec<&str> = catalog
            .list_movies()
            .iter()
            .map(|movie| movie.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Inception", "Interstellar", "The Matrix"]);
    }

    #[test]
    fn test_theaters_for_movie_sorted_and_unique() {
        let catalog = Catalog::reference();

        let inception: Vec<u32> = catalog
            .list_theaters_for_movie(MovieId::new(1))
            .iter()
            .map(|theater| theater.id.get())
            .collect();
        assert_eq!(inception, vec![1, 2]);

        let matrix = catalog.list_theaters_for_movie(MovieId::new(3));
        assert_eq!(matrix.len(), 1);
        assert_eq!(matrix[0].name, "Mall Theater");

        assert!(catalog.list_theaters_for_movie(MovieId::new(99)).is_empty());
    }

    #[test]
    fn test_theaters_sorted_even_when_declared_out_of_order() {
        let catalog = Catalog::new(
            vec![Movie::new(1, "Heat")],
            vec![Theater::new(5, "Five"), Theater::new(2, "Two")],
            vec![Show::new(10, 1, 5), Show::new(11, 1, 2)],
        )
        .unwrap();

        let ids: Vec<u32> = catalog
            .list_theaters_for_movie(MovieId::new(1))
            .iter()
            .map(|theater| theater.id.get())
            .collect();
        assert_eq!(ids, vec![2, 5]);
    }

    #[test]
    fn test_find_show() {
        let catalog = Catalog::reference();
        assert_eq!(
            catalog.find_show(MovieId::new(2), TheaterId::new(1)),
            Some(ShowId::new(3))
        );
        assert_eq!(catalog.find_show(MovieId::new(2), TheaterId::new(2)), None);
        assert_eq!(catalog.find_show(MovieId::new(9), TheaterId::new(9)), None);
    }

    #[test]
    fn test_units_known_at_startup() {
        let ids: Vec<u32> = Catalog::reference()
            .units_known_at_startup()
            .into_iter()
            .map(ShowId::get)
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = Catalog::new(
            vec![Movie::new(1, "A"), Movie::new(1, "B")],
            vec![],
            vec![],
        );
        assert!(matches!(result, Err(CatalogError::DuplicateMovie(id)) if id == MovieId::new(1)));

        let result = Catalog::new(
            vec![Movie::new(1, "A")],
            vec![Theater::new(1, "T")],
            vec![Show::new(1, 1, 1), Show::new(1, 1, 1)],
        );
        assert!(matches!(result, Err(CatalogError::DuplicateShow(_))));
    }

    #[test]
    fn test_rejects_duplicate_screening() {
        let result = Catalog::new(
            vec![Movie::new(1, "A")],
            vec![Theater::new(1, "T")],
            vec![Show::new(1, 1, 1), Show::new(2, 1, 1)],
        );
        assert!(matches!(result, Err(CatalogError::DuplicateScreening { .. })));
    }

    #[test]
    fn test_rejects_dangling_references() {
        let result = Catalog::new(
            vec![Movie::new(1, "A")],
            vec![Theater::new(1, "T")],
            vec![Show::new(1, 2, 1)],
        );
        assert!(matches!(result, Err(CatalogError::UnknownMovie { .. })));

        let result = Catalog::new(
            vec![Movie::new(1, "A")],
            vec![Theater::new(1, "T")],
            vec![Show::new(1, 1, 7)],
        );
        assert!(matches!(result, Err(CatalogError::UnknownTheater { .. })));
    }

    #[test]
    fn test_from_toml() {
        let catalog = Catalog::from_toml_str(
            r#"
            [[movies]]
            id = 7
            title = "Alien"

            [[theaters]]
            id = 3
            name = "Drive-In"

            [[shows]]
            id = 40
            movie_id = 7
            theater_id = 3
            "#,
        )
        .unwrap();

        assert_eq!(catalog.list_movies(), &[Movie::new(7, "Alien")]);
        assert_eq!(
            catalog.find_show(MovieId::new(7), TheaterId::new(3)),
            Some(ShowId::new(40))
        );
    }

    #[test]
    fn test_from_toml_validates() {
        let result = Catalog::from_toml_str(
            r#"
            [[shows]]
            id = 1
            movie_id = 1
            theater_id = 1
            "#,
        );
        assert!(matches!(result, Err(CatalogError::UnknownMovie { .. })));
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        assert!(matches!(
            Catalog::from_toml_str("movies = 3"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Catalog::load("/nonexistent/catalog.toml"),
            Err(CatalogError::Io(_))
        ));
    }
}
