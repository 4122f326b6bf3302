//! ChromaticBot backend library
//!
//! Fetches a listener's top tracks from Spotify, derives a color palette from
//! every album's artwork and returns the albums ordered by hue, saturation or
//! brightness. Per-album color analysis can be cached in a document store so
//! repeated requests skip the image work.
//!
//! # Modules
//!
//! - `api` - HTTP handlers
//! - `chromatic` - color classification, metrics, extraction, aggregation and sorting
//! - `cli` - console front-end for the same pipeline
//! - `config` - environment configuration
//! - `error` - error taxonomy and its HTTP mapping
//! - `management` - color cache gateway and document stores
//! - `server` - axum router and listener
//! - `spotify` - upstream top-tracks and artwork download
//! - `types` - wire and domain types
//! - `utils` - request parameter parsing helpers

pub mod api;
pub mod chromatic;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for binary-level plumbing.
///
/// Library code returns [`error::ChromaticError`]; this alias is for the places
/// (start-up, CLI) where any error is simply reported.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for failures the process cannot continue from, such as an
/// unparseable bind address. Request-level failures are returned as
/// [`error::ChromaticError`] instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for degraded but recoverable states, e.g. a color cache that could not
/// be opened or an upstream call that failed for a single request.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
