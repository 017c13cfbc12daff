// src/store/project.rs

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::StoreError;

/// A hierarchical project identifier, e.g. `Group:SubGroup:Project`.
///
/// Parsed from a colon-delimited string; maps 1:1 to a directory under the
/// store root (`<root>/Group/SubGroup/Project`). Immutable once constructed.
///
/// Empty segments (`A::B`) are dropped, matching the effective path-join
/// behaviour of a naive split. Segments that are `.`, `..`, or contain a path
/// separator are rejected so an identifier can never escape the store root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProjectPath {
    segments: Vec<String>,
}

impl ProjectPath {
    /// Construct from already-validated segments (e.g. real directory names
    /// observed while walking the store).
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The directory this project maps to under `root`.
    pub fn dir_under(&self, root: &Path) -> PathBuf {
        self.segments
            .iter()
            .fold(root.to_path_buf(), |dir, seg| dir.join(seg))
    }
}

impl FromStr for ProjectPath {
    type Err = StoreError;

    fn from_str(ident: &str) -> Result<Self, Self::Err> {
        let mut segments = Vec::new();
        for raw in ident.split(':') {
            let seg = raw.trim();
            if seg.is_empty() {
                continue;
            }
            if seg == "." || seg == ".." || seg.contains('/') || seg.contains('\\') {
                return Err(StoreError::InvalidProjectPath {
                    ident: ident.to_string(),
                    reason: format!("segment '{seg}' is not a valid directory name"),
                });
            }
            segments.push(seg.to_string());
        }
        if segments.is_empty() {
            return Err(StoreError::InvalidProjectPath {
                ident: ident.to_string(),
                reason: "no non-empty segments".to_string(),
            });
        }
        Ok(Self { segments })
    }
}

impl fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(":"))
    }
}

impl serde::Serialize for ProjectPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
