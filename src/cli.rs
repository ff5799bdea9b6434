use clap::Parser;

/// Command-line interface definition for the venuebook server
#[derive(Parser)]
#[command(
    name = "venuebook",
    version = env!("CARGO_PKG_VERSION"),
    about = "Venue booking service for lecturers, backed by SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or a custom location)
    #[arg(long = "db")]
    pub db: Option<String>,

    /// Override listen port
    #[arg(long = "port")]
    pub port: Option<u16>,
}
