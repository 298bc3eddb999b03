//! Navigation build errors.

use std::fmt;

/// Index path of an entry from the root of the `pages` list.
///
/// Displayed as `pages[1].pages[0]` so authors can find the record in
/// their configuration file. The empty location is the `pages` list itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Location(Vec<usize>);

impl Location {
    /// Location of the top-level `pages` list.
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Location of the `index`-th child of this location.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Indices from the root, outermost first.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Whether this is the top-level `pages` list.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<usize>> for Location {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("pages");
        }
        for (depth, index) in self.0.iter().enumerate() {
            if depth > 0 {
                f.write_str(".")?;
            }
            write!(f, "pages[{index}]")?;
        }
        Ok(())
    }
}

/// Error returned when a navigation configuration cannot be built.
///
/// All variants are fatal to the build. The first problem found is reported.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    /// A page record is missing `name`/`path` or its path is malformed.
    #[error("Invalid page at {location}: {reason}")]
    InvalidPage {
        /// Position of the offending record.
        location: Location,
        /// What is wrong with it.
        reason: String,
    },
    /// A section record is missing `name` or has malformed children.
    #[error("Invalid section at {location}: {reason}")]
    InvalidSection {
        /// Position of the offending record.
        location: Location,
        /// What is wrong with it.
        reason: String,
    },
    /// A record is neither a page nor a section.
    #[error(
        "Unrecognized entry at {location}: expected a page with `path` or a section with `pages`"
    )]
    UnrecognizedEntry {
        /// Position of the offending record.
        location: Location,
    },
    /// Two pages share the same normalized route.
    #[error("Duplicate page path {path} at {location}")]
    DuplicatePath {
        /// The normalized route owned by more than one page.
        path: String,
        /// Position of the second page claiming the route.
        location: Location,
    },
}

impl NavError {
    /// Position of the offending record, if the error has one.
    #[must_use]
    pub fn location(&self) -> &Location {
        match self {
            Self::InvalidPage { location, .. }
            | Self::InvalidSection { location, .. }
            | Self::UnrecognizedEntry { location }
            | Self::DuplicatePath { location, .. } => location,
        }
    }
}
