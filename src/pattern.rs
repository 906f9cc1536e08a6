use crate::InsertError;

/// The kind of a single pattern segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SegmentKind {
    /// A literal byte run.
    Static,
    /// `:name`, captures up to the next `/`.
    Param,
    /// `*`, captures the rest of the path.
    Trailing,
}

/// Splits the leading segment off a pattern, returning `(head, tail)`.
///
/// A segment starting with `:` runs until the next `/`, `:` or `*`. A segment
/// starting with `*` is just the `*`. Anything else runs until the next `:`
/// or `*`. Note that `/` is an ordinary byte inside a literal run.
pub(crate) fn split(pattern: &[u8]) -> (&[u8], &[u8]) {
    let end = match pattern.first() {
        None => 0,
        Some(b'*') => 1,
        Some(b':') => pattern[1..]
            .iter()
            .position(|&c| matches!(c, b'/' | b':' | b'*'))
            .map_or(pattern.len(), |i| i + 1),
        Some(_) => pattern[1..]
            .iter()
            .position(|&c| matches!(c, b':' | b'*'))
            .map_or(pattern.len(), |i| i + 1),
    };

    pattern.split_at(end)
}

/// Classifies a segment produced by [`split`].
pub(crate) fn classify(head: &[u8]) -> Result<SegmentKind, InsertError> {
    match head {
        b"*" => Ok(SegmentKind::Trailing),
        // a parameter must be named
        b":" => Err(InsertError::InvalidPath),
        [b':', ..] => Ok(SegmentKind::Param),
        _ => Ok(SegmentKind::Static),
    }
}

/// An iterator over the segments of a pattern.
pub(crate) struct Segments<'a> {
    rest: &'a [u8],
}

impl<'a> Segments<'a> {
    pub(crate) fn new(pattern: &'a [u8]) -> Self {
        Segments { rest: pattern }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let (head, tail) = split(self.rest);
        self.rest = tail;
        Some(head)
    }
}

/// Returns the length of the longest common prefix of `a` and `b`.
pub(crate) fn common_prefix(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(a, b)| a == b).count()
}
