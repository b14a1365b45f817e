//! Path algebra for addressing values in nested structures.
//!
//! This module provides [`JsonPath`] and [`PathSegment`] for building,
//! parsing and printing addresses like `a.b[2].c`. Property segments are
//! joined with `.` and array indexes are written `[n]`.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde_json::Value;

/// A segment of a path.
///
/// Paths are built from segments that represent either property access or array indexing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A property access (e.g., `user`, `email`)
    Field(String),
    /// An array index access (e.g., `[0]`, `[42]`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }

    /// Reads the value this segment addresses inside `container`.
    ///
    /// Returns `None` when the container has the wrong shape or the
    /// property/slot does not exist.
    pub fn lookup<'v>(&self, container: &'v Value) -> Option<&'v Value> {
        match self {
            PathSegment::Field(name) => container.as_object()?.get(name),
            PathSegment::Index(idx) => container.as_array()?.get(*idx),
        }
    }
}

/// Errors raised for path strings that cannot be addressed.
///
/// These signal a schema-usage bug rather than invalid data, so they are
/// returned to the caller instead of being folded into validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The path contains a quote character, which is ambiguous and unsupported.
    #[error("quoted path segments are not supported: {0}")]
    QuotedSegment(String),
    /// The path is not a sequence of `.name` and `[index]` segments.
    #[error("malformed path '{path}' at byte {position}")]
    Malformed {
        /// The offending path string.
        path: String,
        /// Byte offset of the first unexpected character.
        position: usize,
    },
}

/// A path to a value in a nested structure.
///
/// `JsonPath` represents locations like `users[0].email` and provides
/// methods for building paths incrementally and for parsing them back.
///
/// # Example
///
/// ```rust
/// use yop::JsonPath;
///
/// let path = JsonPath::root()
///     .push_field("users")
///     .push_index(0)
///     .push_field("email");
///
/// assert_eq!(path.to_string(), "users[0].email");
/// assert_eq!(JsonPath::parse("users[0].email").unwrap(), path);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Creates an empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a single field segment.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// Creates a path from a single index segment.
    pub fn from_index(idx: usize) -> Self {
        Self {
            segments: vec![PathSegment::Index(idx)],
        }
    }

    /// Parses a dotted/bracketed path string such as `a.b[2].c`.
    ///
    /// The empty string parses to the root path.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::QuotedSegment`] if the string contains `"`, `'`
    /// or a backtick, and [`PathError::Malformed`] for anything that is not a
    /// well-formed sequence of segments (`a..b`, `a[x]`, trailing `.`).
    pub fn parse(input: &str) -> Result<Self, PathError> {
        if input.contains(['"', '\'', '`']) {
            return Err(PathError::QuotedSegment(input.to_string()));
        }

        let malformed = |position: usize| PathError::Malformed {
            path: input.to_string(),
            position,
        };

        let mut segments = Vec::new();
        let mut field = String::new();
        let mut after_dot = false;
        let mut chars = input.char_indices();

        while let Some((pos, c)) = chars.next() {
            match c {
                '.' => {
                    if !field.is_empty() {
                        segments.push(PathSegment::Field(std::mem::take(&mut field)));
                    } else if after_dot || !matches!(segments.last(), Some(PathSegment::Index(_)))
                    {
                        return Err(malformed(pos));
                    }
                    after_dot = true;
                }
                '[' => {
                    if !field.is_empty() {
                        segments.push(PathSegment::Field(std::mem::take(&mut field)));
                    } else if after_dot {
                        return Err(malformed(pos));
                    }
                    let mut digits = String::new();
                    loop {
                        match chars.next() {
                            Some((_, ']')) => break,
                            Some((_, d)) if d.is_ascii_digit() => digits.push(d),
                            Some((p, _)) => return Err(malformed(p)),
                            None => return Err(malformed(input.len())),
                        }
                    }
                    let index = digits.parse::<usize>().map_err(|_| malformed(pos))?;
                    segments.push(PathSegment::Index(index));
                    after_dot = false;
                }
                ']' => return Err(malformed(pos)),
                other => {
                    // `a[0]b` needs a dot between the index and the name
                    if field.is_empty()
                        && !after_dot
                        && matches!(segments.last(), Some(PathSegment::Index(_)))
                    {
                        return Err(malformed(pos));
                    }
                    field.push(other);
                    after_dot = false;
                }
            }
        }

        if !field.is_empty() {
            segments.push(PathSegment::Field(field));
        } else if after_dot {
            return Err(malformed(input.len()));
        }

        Ok(Self { segments })
    }

    /// Returns a new path with a field segment appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Field(name.into()))
    }

    /// Returns a new path with an index segment appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push_index(&self, index: usize) -> Self {
        self.push(PathSegment::Index(index))
    }

    /// Returns a new path with `segment` appended.
    pub fn push(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the segments as a slice.
    pub fn as_slice(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns the parent path (all segments except the last), or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Follows this path from `root` and returns the addressed value, if any.
    pub fn lookup<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        self.segments
            .iter()
            .try_fold(root, |current, segment| segment.lookup(current))
    }
}

/// Returns `path` with its last segment removed.
///
/// Returns `Ok(None)` when the path has no parent, i.e. it is empty or
/// already a single root-level segment.
///
/// # Errors
///
/// Propagates [`PathError`] from parsing, notably for quoted segments.
///
/// # Example
///
/// ```rust
/// use yop::path::parent_path;
///
/// assert_eq!(parent_path("a.b[2]").unwrap(), Some("a.b".to_string()));
/// assert_eq!(parent_path("a").unwrap(), None);
/// assert!(parent_path("a[\"b\"]").is_err());
/// ```
pub fn parent_path(path: &str) -> Result<Option<String>, PathError> {
    let parsed = JsonPath::parse(path)?;
    if parsed.len() <= 1 {
        return Ok(None);
    }
    Ok(parsed.parent().map(|p| p.to_string()))
}

impl FromStr for JsonPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Vec<PathSegment>> for JsonPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}
