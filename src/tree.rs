use crate::pattern::{self, SegmentKind, Segments};
use crate::{InsertError, Params};

use std::{fmt, mem, str};

/// The kind of a node in the tree.
#[derive(PartialEq, Eq, Clone, Debug)]
pub(crate) enum NodeKind {
    /// A literal byte run.
    Static,
    /// A named parameter, `:name`.
    Param { name: Box<str> },
    /// A trailing wildcard, `*`.
    Trailing,
}

impl NodeKind {
    fn from_segment(segment: &[u8]) -> Result<NodeKind, InsertError> {
        Ok(match pattern::classify(segment)? {
            SegmentKind::Static => NodeKind::Static,
            SegmentKind::Param => {
                let name = str::from_utf8(&segment[1..]).map_err(|_| InsertError::InvalidPath)?;
                NodeKind::Param { name: name.into() }
            }
            SegmentKind::Trailing => NodeKind::Trailing,
        })
    }

    fn is_static(&self) -> bool {
        matches!(self, NodeKind::Static)
    }
}

// Why a child cannot be attached to a node.
enum Attach {
    Invalid,
    Conflict,
}

/// A node in a compressed prefix tree.
///
/// A node either has a single wild child (a parameter or a trailing
/// wildcard), or any number of static children whose labels start with
/// distinct bytes. A node with a value is the end of a registered route.
#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) kind: NodeKind,
    // The bytes consumed by entering this node: a literal run, `:name` or `*`.
    pub(crate) prefix: Vec<u8>,
    pub(crate) wild_child: bool,
    // The first byte of each child's prefix, in child order.
    pub(crate) indices: Vec<u8>,
    pub(crate) children: Vec<Node<T>>,
    pub(crate) value: Option<T>,
}

impl<T> Node<T> {
    fn new(kind: NodeKind, prefix: &[u8]) -> Self {
        Node {
            kind,
            prefix: prefix.to_owned(),
            wild_child: false,
            indices: Vec::new(),
            children: Vec::new(),
            value: None,
        }
    }

    /// Builds a chain of nodes for `pattern`, ending in a node holding `value`.
    pub(crate) fn build(pattern: &[u8], value: T) -> Result<Self, InsertError> {
        let segments = Segments::new(pattern)
            .map(|segment| NodeKind::from_segment(segment).map(|kind| (segment, kind)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut chain = segments.into_iter().rev();
        let mut node = match chain.next() {
            Some((segment, kind)) => Node::new(kind, segment),
            // the empty route
            None => Node::new(NodeKind::Static, b""),
        };
        node.value = Some(value);

        for (segment, kind) in chain {
            let mut parent = Node::new(kind, segment);
            // a fresh chain can only be rejected because the pattern is malformed
            parent
                .check_child(&node)
                .map_err(|_| InsertError::InvalidPath)?;
            parent.push_child(node);
            node = parent;
        }

        Ok(node)
    }

    /// Inserts a route into the tree.
    ///
    /// The tree is left untouched if the insertion fails.
    pub(crate) fn insert(&mut self, route: &str, value: T) -> Result<(), InsertError> {
        let route = route.as_bytes();
        let mut remaining = route;
        // the length of the route prefix consumed before `current`
        let mut consumed = 0;
        let mut current = self;

        let split = loop {
            let common = pattern::common_prefix(&current.prefix, remaining);
            remaining = &remaining[common..];

            if common < current.prefix.len() {
                break Some(common);
            }

            if remaining.is_empty() {
                break None;
            }

            let next = current.indices.iter().position(|&c| c == remaining[0]);
            match next {
                Some(i) => {
                    consumed += current.prefix.len();
                    current = &mut current.children[i];
                }
                None => break None,
            }
        };

        // only static nodes can be split
        if split.is_some() && !current.kind.is_static() {
            return Err(InsertError::conflict(&route[..consumed], current));
        }

        if remaining.is_empty() {
            if let Some(at) = split {
                current.split(at);
            }

            if current.value.replace(value).is_some() {
                debug!(
                    "replaced value for route {:?}",
                    String::from_utf8_lossy(route)
                );
            }

            return Ok(());
        }

        let child = Node::build(remaining, value)?;

        match split {
            Some(at) => {
                // the node left after a split only has a static child
                if !child.kind.is_static() {
                    return Err(InsertError::conflict(&route[..consumed], current));
                }

                current.split(at);
            }
            None => {
                current.check_child(&child).map_err(|err| match err {
                    Attach::Invalid => InsertError::InvalidPath,
                    Attach::Conflict => InsertError::conflict(&route[..consumed], current),
                })?;
            }
        }

        current.push_child(child);
        Ok(())
    }

    // Splits this node at `at`, moving the suffix and everything below it
    // into a single static child.
    fn split(&mut self, at: usize) {
        trace!(
            "splitting {:?} at {}",
            String::from_utf8_lossy(&self.prefix),
            at
        );

        let child = Node {
            kind: NodeKind::Static,
            prefix: self.prefix.split_off(at),
            wild_child: mem::take(&mut self.wild_child),
            indices: mem::take(&mut self.indices),
            children: mem::take(&mut self.children),
            value: self.value.take(),
        };

        self.push_child(child);
    }

    // Checks that `child` may be attached below this node.
    fn check_child(&self, child: &Node<T>) -> Result<(), Attach> {
        match self.kind {
            NodeKind::Trailing => return Err(Attach::Invalid),
            NodeKind::Param { .. } => {
                if !child.kind.is_static() {
                    return Err(Attach::Invalid);
                }

                // anything else would require splitting the parameter
                if child.prefix.first() != Some(&b'/') {
                    return Err(Attach::Conflict);
                }
            }
            NodeKind::Static => {}
        }

        // siblings share a kind so that matching never has to backtrack
        match self.children.first() {
            Some(sibling) if mem::discriminant(&sibling.kind) != mem::discriminant(&child.kind) => {
                Err(Attach::Conflict)
            }
            _ => Ok(()),
        }
    }

    fn push_child(&mut self, child: Node<T>) {
        if !child.kind.is_static() {
            self.wild_child = true;
        }

        self.indices.push(child.prefix[0]);
        self.children.push(child);
    }

    /// Matches `path` against the tree, appending captured parameters to `params`.
    ///
    /// Parameters captured before a failed match are left in `params`.
    pub(crate) fn lookup<'n, 'p>(
        &'n self,
        path: &'p str,
        params: &mut Params<'n, 'p>,
    ) -> Option<&'n T> {
        let bytes = path.as_bytes();
        let mut pos = 0;
        let mut current = self;

        loop {
            match &current.kind {
                NodeKind::Static => {
                    if !bytes[pos..].starts_with(&current.prefix) {
                        return None;
                    }

                    pos += current.prefix.len();
                }
                NodeKind::Param { name } => {
                    // the capture may be empty, but the path may not be exhausted
                    if pos == bytes.len() {
                        return None;
                    }

                    let end = bytes[pos..]
                        .iter()
                        .position(|&c| c == b'/')
                        .map_or(bytes.len(), |i| pos + i);

                    params.push(name, path.get(pos..end)?);
                    pos = end;
                }
                NodeKind::Trailing => {
                    params.push("*", path.get(pos..)?);
                    pos = bytes.len();
                }
            }

            // an exhausted path may still reach a trailing wildcard
            if pos == bytes.len() && (current.value.is_some() || !current.wild_child) {
                break;
            }

            if current.wild_child {
                current = &current.children[0];
                continue;
            }

            match current.indices.iter().position(|&c| c == bytes[pos]) {
                Some(i) => current = &current.children[i],
                None => break,
            }
        }

        if pos == bytes.len() {
            current.value.as_ref()
        } else {
            None
        }
    }

    /// Returns the number of routes stored in this subtree.
    pub(crate) fn len(&self) -> usize {
        let own = usize::from(self.value.is_some());
        own + self.children.iter().map(Node::len).sum::<usize>()
    }

    /// Consumes the tree, returning every route along with its value.
    pub(crate) fn into_routes(self) -> Vec<(String, T)> {
        let mut routes = Vec::new();
        self.collect_routes(&mut Vec::new(), &mut routes);
        routes
    }

    fn collect_routes(self, route: &mut Vec<u8>, routes: &mut Vec<(String, T)>) {
        let len = route.len();
        route.extend_from_slice(&self.prefix);

        if let Some(value) = self.value {
            routes.push((String::from_utf8_lossy(route).into_owned(), value));
        }

        for child in self.children {
            child.collect_routes(route, routes);
        }

        route.truncate(len);
    }

    /// Checks the structural invariants of the tree.
    #[cfg(any(test, feature = "__test_helpers"))]
    pub(crate) fn check_invariants(&self) -> Result<(), String> {
        let label = String::from_utf8_lossy(&self.prefix);

        if self.indices.len() != self.children.len() {
            return Err(format!("{label:?}: indices and children differ in length"));
        }

        for (&index, child) in self.indices.iter().zip(&self.children) {
            if child.prefix.first() != Some(&index) {
                return Err(format!("{label:?}: index {:?} is stale", index as char));
            }
        }

        let wild = self.children.iter().filter(|c| !c.kind.is_static()).count();
        if self.wild_child != (wild > 0) || (wild > 0 && self.children.len() != 1) {
            return Err(format!("{label:?}: wild child must be an only child"));
        }

        let mut firsts = self.indices.clone();
        firsts.sort_unstable();
        firsts.dedup();
        if firsts.len() != self.indices.len() {
            return Err(format!("{label:?}: children share a first byte"));
        }

        match &self.kind {
            NodeKind::Static => {}
            NodeKind::Param { name } => {
                if name.is_empty() || self.prefix != [&b":"[..], name.as_bytes()].concat() {
                    return Err(format!("{label:?}: malformed parameter"));
                }

                if self.children.len() > 1
                    || self.children.iter().any(|c| c.prefix.first() != Some(&b'/'))
                {
                    return Err(format!("{label:?}: parameter child must start with '/'"));
                }
            }
            NodeKind::Trailing => {
                if self.prefix != b"*" || !self.children.is_empty() {
                    return Err(format!("{label:?}: trailing wildcard must be a leaf"));
                }
            }
        }

        if self.value.is_none() && self.children.is_empty() {
            return Err(format!("{label:?}: dangling node"));
        }

        self.children.iter().try_for_each(Node::check_invariants)
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut node = f.debug_struct("Node");
        node.field("kind", &self.kind)
            .field("prefix", &String::from_utf8_lossy(&self.prefix))
            .field("end", &self.value.is_some())
            .field("wild_child", &self.wild_child)
            .field("value", &self.value);

        if !self.children.is_empty() {
            node.field("indices", &String::from_utf8_lossy(&self.indices))
                .field("children", &self.children);
        }

        node.finish()
    }
}
