use crate::tree::Node;
use crate::{InsertError, MatchError, Params};

/// A zero-copy path router.
///
/// See [the crate documentation](crate) for details.
#[derive(Clone, Debug)]
pub struct Router<T> {
    root: Option<Node<T>>,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self { root: None }
    }
}

impl<T> Router<T> {
    /// Construct a new router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a route into the router.
    ///
    /// Inserting a route that is already registered replaces its value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use pathrouter::Router;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut router = Router::new();
    /// router.insert("/home", "Welcome!")?;
    /// router.insert("/users/:id", "A User")?;
    /// router.insert("/static/*", "A file")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn insert(&mut self, route: impl AsRef<str>, value: T) -> Result<(), InsertError> {
        let route = route.as_ref();

        match &mut self.root {
            Some(root) => root.insert(route, value)?,
            None => self.root = Some(Node::build(route.as_bytes(), value)?),
        }

        debug!("inserted route {route:?}");
        Ok(())
    }

    /// Match a path, appending any captured parameters to `params`.
    ///
    /// Returns the value of the matched route. Parameters captured during a
    /// failed match are left in `params`, so a buffer reused across lookups
    /// should be [cleared](Params::clear) before each one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use pathrouter::{Params, Router};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut router = Router::new();
    /// router.insert("/home", "Welcome!")?;
    ///
    /// let mut params = Params::new();
    /// assert_eq!(router.lookup("/home", &mut params), Some(&"Welcome!"));
    ///
    /// params.clear();
    /// assert_eq!(router.lookup("/homes", &mut params), None);
    /// # Ok(())
    /// # }
    /// ```
    pub fn lookup<'r, 'p>(&'r self, path: &'p str, params: &mut Params<'r, 'p>) -> Option<&'r T> {
        let value = self.root.as_ref()?.lookup(path, params);
        if value.is_none() {
            trace!("no route matches {path:?}");
        }
        value
    }

    /// Tries to find a value in the router matching the given path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use pathrouter::Router;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut router = Router::new();
    /// router.insert("/home", "Welcome!")?;
    ///
    /// let matched = router.at("/home").unwrap();
    /// assert_eq!(*matched.value, "Welcome!");
    /// # Ok(())
    /// # }
    /// ```
    pub fn at<'r, 'p>(&'r self, path: &'p str) -> Result<Match<'r, 'p, &'r T>, MatchError> {
        let mut params = Params::new();
        match self.lookup(path, &mut params) {
            Some(value) => Ok(Match { value, params }),
            None => Err(MatchError::NotFound),
        }
    }

    /// Merge a given router into the current one.
    ///
    /// Routes are inserted one at a time, so the routes preceding a failed
    /// insertion stay registered and the remaining ones are dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use pathrouter::Router;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut root = Router::new();
    /// root.insert("/home", "Welcome!")?;
    ///
    /// let mut child = Router::new();
    /// child.insert("/users/:id", "A User")?;
    ///
    /// root.merge(child)?;
    /// assert!(root.at("/users/1").is_ok());
    /// # Ok(())
    /// # }
    /// ```
    pub fn merge(&mut self, other: Self) -> Result<(), InsertError> {
        let Some(root) = other.root else {
            return Ok(());
        };

        for (route, value) in root.into_routes() {
            self.insert(route, value)?;
        }

        Ok(())
    }

    /// Returns the number of registered routes.
    pub fn len(&self) -> usize {
        self.root.as_ref().map_or(0, Node::len)
    }

    /// Returns `true` if no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Checks the structural invariants of the underlying tree.
    #[doc(hidden)]
    #[cfg(any(test, feature = "__test_helpers"))]
    pub fn check_invariants(&self) -> Result<(), String> {
        match &self.root {
            Some(root) => root.check_invariants(),
            None => Ok(()),
        }
    }
}

/// A successful match consisting of the registered value
/// and URL parameters, returned by [`Router::at`](Router::at).
#[derive(Debug)]
pub struct Match<'k, 'v, V> {
    /// The value stored under the matched node.
    pub value: V,

    /// The route parameters. See [parameters](crate#parameters) for more details.
    pub params: Params<'k, 'v>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_router() {
        let router: Router<u32> = Router::new();
        let mut params = Params::new();

        assert!(router.is_empty());
        assert_eq!(router.lookup("", &mut params), None);
        assert_eq!(router.at("/").map(|m| *m.value), Err(MatchError::NotFound));
        router.check_invariants().unwrap();
    }

    #[test]
    fn failed_first_insert_keeps_router_empty() {
        let mut router = Router::new();

        assert_eq!(router.insert(":a:b", 1), Err(InsertError::InvalidPath));
        assert!(router.is_empty());

        router.insert(":a/:b", 2).unwrap();
        assert_eq!(router.len(), 1);
    }

    #[test]
    fn repeated_insert_replaces_value() {
        let mut router = Router::new();
        router.insert("/a/b", 100).unwrap();
        router.insert("/a/c", 101).unwrap();
        router.insert("/a/b", 102).unwrap();

        assert_eq!(router.len(), 2);
        assert_eq!(router.at("/a/b").map(|m| *m.value), Ok(102));
        assert_eq!(router.at("/a/c").map(|m| *m.value), Ok(101));
        router.check_invariants().unwrap();
    }

    #[test]
    fn reused_params_buffer() {
        let mut router = Router::new();
        router.insert("/users/:id", 1).unwrap();
        router.insert("/files/:dir/*", 2).unwrap();

        let paths = ["/users/7", "/files/etc/passwd", "/files/etc"];
        let mut params = Params::new();

        params.clear();
        assert_eq!(router.lookup(paths[0], &mut params), Some(&1));
        assert_eq!(params.iter().collect::<Vec<_>>(), vec![("id", "7")]);

        params.clear();
        assert_eq!(router.lookup(paths[1], &mut params), Some(&2));
        assert_eq!(
            params.iter().collect::<Vec<_>>(),
            vec![("dir", "etc"), ("*", "passwd")]
        );

        // partial captures are kept on failure
        params.clear();
        assert_eq!(router.lookup(paths[2], &mut params), None);
        assert_eq!(params.get("dir"), Some("etc"));
    }
}
