//! Stable addresses for campaign text leaves
//!
//! Internally a path is a list of [`PathSegment`]s. The dotted/bracketed
//! string form (`googleAds[0].headline`) only exists at the boundary: oracle
//! prompts, oracle responses and serialized keys.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One step into the campaign tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// Named field, using the serialized (camelCase) key
    Field(String),
    /// Position inside an array
    Index(usize),
}

/// Errors produced when parsing a path string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,

    #[error("unexpected character '{ch}' at offset {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("invalid array index: '{0}'")]
    InvalidIndex(String),

    #[error("unterminated array index")]
    Unterminated,

    #[error("path ends with a separator")]
    TrailingSeparator,
}

/// Address of a single text leaf, e.g. `postcard.professional.front.headline`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Child path addressing a named field
    pub fn field(&self, name: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.0.push(PathSegment::Field(name.into()));
        next
    }

    /// Child path addressing an array element
    pub fn index(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.0.push(PathSegment::Index(index));
        next
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.0.pop()
    }

    /// Top-level field name (the platform or strategy key)
    pub fn root_field(&self) -> Option<&str> {
        match self.0.first() {
            Some(PathSegment::Field(name)) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathError::Empty);
        }

        let mut segments = Vec::new();
        let mut chars = s.char_indices().peekable();
        let mut expect_field = true;

        while let Some(&(pos, ch)) = chars.peek() {
            if expect_field {
                let mut name = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        name.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if name.is_empty() {
                    return Err(PathError::UnexpectedChar { ch, pos });
                }
                segments.push(PathSegment::Field(name));
                expect_field = false;
                continue;
            }

            match ch {
                '.' => {
                    chars.next();
                    expect_field = true;
                }
                '[' => {
                    chars.next();
                    let mut digits = String::new();
                    loop {
                        match chars.next() {
                            Some((_, ']')) => break,
                            Some((_, d)) if d.is_ascii_digit() => digits.push(d),
                            Some((pos, ch)) => return Err(PathError::UnexpectedChar { ch, pos }),
                            None => return Err(PathError::Unterminated),
                        }
                    }
                    let index = digits
                        .parse()
                        .map_err(|_| PathError::InvalidIndex(digits.clone()))?;
                    segments.push(PathSegment::Index(index));
                }
                other => return Err(PathError::UnexpectedChar { ch: other, pos }),
            }
        }

        if expect_field {
            return Err(PathError::TrailingSeparator);
        }

        Ok(Self(segments))
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
