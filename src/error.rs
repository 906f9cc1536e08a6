use crate::tree::Node;

use thiserror::Error;

/// Represents errors that can occur when inserting a new route.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Error)]
pub enum InsertError {
    /// The pattern is lexically malformed: a bare `:`, a parameter directly
    /// followed by another parameter or by `*`, or anything after a `*`.
    #[error("invalid route pattern")]
    InvalidPath,
    /// The pattern cannot be placed without overlapping an existing route.
    #[error("insertion failed due to conflict with previously registered route: {with}")]
    Conflict {
        /// The existing route that the insertion is conflicting with.
        with: String,
    },
}

impl InsertError {
    /// Builds a conflict error naming a registered route that passes through `current`.
    ///
    /// `prefix` is the part of the inserted pattern consumed before reaching
    /// `current`; it is followed by the node's own label and its first-child chain.
    pub(crate) fn conflict<T>(prefix: &[u8], current: &Node<T>) -> Self {
        let mut route = prefix.to_owned();
        route.extend_from_slice(&current.prefix);

        let mut current = current.children.first();
        while let Some(node) = current {
            route.extend_from_slice(&node.prefix);
            current = node.children.first();
        }

        InsertError::Conflict {
            with: String::from_utf8_lossy(&route).into_owned(),
        }
    }
}

/// A failed match attempt.
///
/// ```
/// use pathrouter::{MatchError, Router};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut router = Router::new();
/// router.insert("/home", "Welcome!")?;
/// router.insert("/blog/", "Our blog.")?;
///
/// // no routes match
/// if let Err(err) = router.at("/foobar") {
///     assert_eq!(err, MatchError::NotFound);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy, Error)]
pub enum MatchError {
    /// No matching route was found.
    #[error("matching route not found")]
    NotFound,
}
