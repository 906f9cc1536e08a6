//! A compact, zero-copy path router.
//!
//! ```rust
//! use pathrouter::Router;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut router = Router::new();
//! router.insert("/home", "Welcome!")?;
//! router.insert("/users/:id", "A User")?;
//!
//! let matched = router.at("/users/978")?;
//! assert_eq!(matched.params.get("id"), Some("978"));
//! assert_eq!(*matched.value, "A User");
//! # Ok(())
//! # }
//! ```
//!
//! # Parameters
//!
//! A route pattern is made of literal text, named parameters and at most one
//! trailing wildcard. There is no escape mechanism.
//!
//! Named parameters are introduced with `:`. The name runs until the next
//! `/`, `:` or `*`, and the parameter matches the run of the path up to the
//! next `/`. The run may be empty, but the path must not end where the
//! parameter starts:
//!
//! ```rust
//! # use pathrouter::Router;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut m = Router::new();
//! m.insert("/users/:id", true)?;
//! m.insert("/blog/post-:slug", true)?;
//!
//! assert_eq!(m.at("/users/1")?.params.get("id"), Some("1"));
//! assert_eq!(m.at("/blog/post-hello")?.params.get("slug"), Some("hello"));
//! assert!(m.at("/users/").is_err());
//! assert!(m.at("/users/1/2").is_err());
//! # Ok(())
//! # }
//! ```
//!
//! A `*` at the end of a pattern matches the rest of the path, including an
//! empty rest, and is bound under the name `*`:
//!
//! ```rust
//! # use pathrouter::Router;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut m = Router::new();
//! m.insert("/static/*", true)?;
//!
//! assert_eq!(m.at("/static/css/main.css")?.params.get("*"), Some("css/main.css"));
//! assert_eq!(m.at("/static/")?.params.get("*"), Some(""));
//! assert!(m.at("/static").is_err());
//! # Ok(())
//! # }
//! ```
//!
//! # Conflicts
//!
//! Matching never backtracks, so a position in the tree can hold either
//! literal children or a single parameter or wildcard, never both:
//!
//! ```rust
//! use pathrouter::{InsertError, Router};
//!
//! let mut m = Router::new();
//! m.insert("/a", 1).unwrap();
//! assert_eq!(
//!     m.insert("/:b", 2),
//!     Err(InsertError::Conflict { with: "/a".into() })
//! );
//! ```
//!
//! Paths are matched byte for byte. Percent-decoding, case folding and
//! trailing slash handling are left to the caller, who should apply them to
//! both patterns and paths.
#![deny(clippy::all)]
#![forbid(unsafe_code)]

#[macro_use]
extern crate log;

mod error;
mod params;
mod pattern;
mod router;
mod tree;

pub use error::{InsertError, MatchError};
pub use params::{Params, ParamsIter};
pub use router::{Match, Router};
