//! Interactive movie booking REPL.

use cinema_booking_cli::{Config, HELP, run_repl};
use cinema_booking_core::BookingService;
use tokio::io::{self, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Logs go to stderr so they never interleave with REPL output
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_new(&config.log_level)
                .unwrap_or_else(|_| "cinema_booking=info,cinema_booking_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let catalog = config.load_catalog()?;
    info!(
        movies = catalog.list_movies().len(),
        shows = catalog.shows().len(),
        "Catalog loaded"
    );
    let service = BookingService::new(catalog);

    let mut stdout = io::stdout();
    stdout
        .write_all(format!("Movie Booking CLI\n{HELP}\n").as_bytes())
        .await?;

    run_repl(&service, BufReader::new(io::stdin()), stdout, &config.prompt).await?;

    info!("Goodbye");
    Ok(())
}
