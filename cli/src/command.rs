//! REPL command parsing and execution.
//!
//! ```text
//! movies
//! theaters <movie_id>
//! seats <movie_id> <theater_id>
//! book <movie_id> <theater_id> a1 a2 ...
//! help | exit
//! ```

use cinema_booking_core::{BookingService, MovieId, ShowId, TheaterId};
use std::fmt::Write as _;
use thiserror::Error;

/// Command list printed by `help` and at startup.
pub const HELP: &str = "Commands:
  movies
  theaters <movie_id>
  seats <movie_id> <theater_id>
  book <movie_id> <theater_id> a1 a2 ...
  exit";

const NO_SHOW: &str = "No show for that movie+theater";

/// A parsed REPL command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the command list
    Help,
    /// List every movie
    Movies,
    /// List theaters screening a movie
    Theaters {
        /// Movie to look up
        movie_id: MovieId,
    },
    /// List free seats for the show of a movie at a theater
    Seats {
        /// Movie of the show
        movie_id: MovieId,
        /// Theater of the show
        theater_id: TheaterId,
    },
    /// Book seats for the show of a movie at a theater
    Book {
        /// Movie of the show
        movie_id: MovieId,
        /// Theater of the show
        theater_id: TheaterId,
        /// Seat labels, in the order given
        seats: Vec<String>,
    },
    /// Leave the REPL
    Exit,
}

/// Errors produced while parsing a command line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The first word is not a known command.
    #[error("Unknown command. Type 'help'.")]
    Unknown(String),

    /// A required argument is missing or not a number, or a command that
    /// takes no arguments was given some.
    #[error("Usage: {usage}")]
    Usage {
        /// Expected form of the command
        usage: &'static str,
    },
}

impl Command {
    /// Parse one input line. Returns `Ok(None)` for a blank line.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Unknown`] for an unrecognised command and
    /// [`CommandError::Usage`] for missing or non-numeric ids and for trailing
    /// words after `help`, `movies` or `exit`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };

        let command = match name {
            "help" => no_arguments(words, Self::Help, "help")?,
            "movies" => no_arguments(words, Self::Movies, "movies")?,
            "exit" | "quit" => no_arguments(words, Self::Exit, "exit")?,
            "theaters" => {
                const USAGE: &str = "theaters <movie_id>";
                Self::Theaters {
                    movie_id: MovieId::new(number(words.next(), USAGE)?),
                }
            }
            "seats" => {
                const USAGE: &str = "seats <movie_id> <theater_id>";
                Self::Seats {
                    movie_id: MovieId::new(number(words.next(), USAGE)?),
                    theater_id: TheaterId::new(number(words.next(), USAGE)?),
                }
            }
            "book" => {
                const USAGE: &str = "book <movie_id> <theater_id> a1 a2 ...";
                Self::Book {
                    movie_id: MovieId::new(number(words.next(), USAGE)?),
                    theater_id: TheaterId::new(number(words.next(), USAGE)?),
                    seats: words.map(str::to_string).collect(),
                }
            }
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }

    /// Run the command against `service` and render its output.
    ///
    /// `Exit` renders nothing; the caller is expected to stop reading.
    #[must_use]
    pub fn execute(&self, service: &BookingService) -> String {
        match self {
            Self::Help => HELP.to_string(),
            Self::Exit => String::new(),
            Self::Movies => {
                let mut out = String::new();
                for movie in service.list_movies() {
                    let _ = writeln!(out, "{}: {}", movie.id, movie.title);
                }
                out.trim_end().to_string()
            }
            Self::Theaters { movie_id } => {
                let theaters = service.list_theaters_for_movie(*movie_id);
                if theaters.is_empty() {
                    return format!("No theaters found for movie_id={movie_id}");
                }
                theaters
                    .iter()
                    .map(|theater| format!("{}: {}", theater.id, theater.name))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Self::Seats {
                movie_id,
                theater_id,
            } => with_show(service, *movie_id, *theater_id, |show_id| {
                match service.list_available_seats(show_id) {
                    Ok(seats) => {
                        format!("Available seats ({}): {}", seats.len(), seats.join(", "))
                    }
                    Err(error) => format!("FAIL: {error}"),
                }
            }),
            Self::Book {
                movie_id,
                theater_id,
                seats,
            } => with_show(service, *movie_id, *theater_id, |show_id| {
                match service.book_seats(show_id, seats) {
                    Ok(_) => "OK: Booked successfully".to_string(),
                    Err(error) => format!("FAIL: {error}"),
                }
            }),
        }
    }
}

fn no_arguments<'a>(
    mut rest: impl Iterator<Item = &'a str>,
    command: Command,
    usage: &'static str,
) -> Result<Command, CommandError> {
    match rest.next() {
        Some(_) => Err(CommandError::Usage { usage }),
        None => Ok(command),
    }
}

fn number(word: Option<&str>, usage: &'static str) -> Result<u32, CommandError> {
    word.and_then(|word| word.parse().ok())
        .ok_or(CommandError::Usage { usage })
}

fn with_show(
    service: &BookingService,
    movie_id: MovieId,
    theater_id: TheaterId,
    render: impl FnOnce(ShowId) -> String,
) -> String {
    service
        .find_show(movie_id, theater_id)
        .map_or_else(|| NO_SHOW.to_string(), render)
}
