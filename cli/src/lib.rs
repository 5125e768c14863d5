//! # Cinema Booking CLI
//!
//! Line-oriented front end over [`BookingService`]. The REPL reads one
//! command per line, prints its output, and stops on `exit` or end of input.
//!
//! ```text
//! > movies
//! 1: Inception
//! > book 1 1 a1 a2
//! OK: Booked successfully
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod command;
pub mod config;

pub use command::{Command, CommandError, HELP};
pub use config::Config;

use cinema_booking_core::BookingService;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Run the read-eval-print loop until `exit` or end of input.
///
/// Blank lines are ignored. Parse errors are printed and the loop continues.
///
/// # Errors
///
/// Returns any I/O error raised by `reader` or `writer`.
pub async fn run_repl<R, W>(
    service: &BookingService,
    reader: R,
    mut writer: W,
    prompt: &str,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    loop {
        writer.write_all(prompt.as_bytes()).await?;
        writer.flush().await?;

        let Some(line) = lines.next_line().await? else {
            tracing::debug!("End of input");
            break;
        };

        let output = match Command::parse(&line) {
            Ok(None) => continue,
            Ok(Some(Command::Exit)) => break,
            Ok(Some(command)) => {
                tracing::debug!(?command, "Executing command");
                command.execute(service)
            }
            Err(error) => error.to_string(),
        };

        writer.write_all(output.as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }

    writer.flush().await
}
