//! # CLI Module
//!
//! Console front-end for the chromatic pipeline. Every command runs the same
//! [`crate::chromatic::ChromaticService`] the HTTP server uses, configured from
//! the environment.
//!
//! ## Commands
//!
//! - [`serve`] - run the HTTP backend
//! - [`albums`] - print the albums of the top tracks as a color-sorted table
//! - [`groups`] - print the albums grouped by palette similarity
//! - [`list_cache`] / [`forget_cache`] - inspect and prune the color cache
//!
//! ```bash
//! chromabot serve --addr 127.0.0.1:8080
//! chromabot albums --token $TOKEN --time-revision 1m --quantity 30 --sort brightness
//! chromabot groups --threshold 0.8
//! chromabot cache list
//! ```
//!
//! Long-running calls show a spinner; failures end the process through
//! [`crate::error!`].

mod albums;
mod cache;
mod serve;

pub use albums::albums;
pub use albums::groups;
pub use cache::forget_cache;
pub use cache::list_cache;
pub use serve::serve;
