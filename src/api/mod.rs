//! # API Module
//!
//! HTTP handlers of the ChromaticBot backend, mounted by [`crate::server::router`].
//!
//! ## Endpoints
//!
//! - `POST /chromatic/albums` ([`chromatic_albums`]) - albums of the listener's
//!   top tracks, ordered by hue, saturation or brightness. Also served at the
//!   legacy path `POST /get_albums_by_chromaticity`.
//! - `POST /chromatic/groups` ([`chromatic_groups`]) - the same albums grouped
//!   by palette similarity instead of sorted.
//! - `GET /health` ([`health`]) - liveness check.
//!
//! Request bodies carry the Spotify bearer token, a time revision (`1m`, `6m`
//! or `a`) and the number of songs (1-50). Failures are answered with the status
//! of the [`crate::error::ChromaticError`] variant and a `{"detail": ...}` body.

mod chromatic;
mod health;

pub use chromatic::chromatic_albums;
pub use chromatic::chromatic_groups;
pub use health::health;
