//! Cluster identity and existence state.

use std::fmt;
use std::path::PathBuf;

/// Whether the named cluster exists in the cluster tool's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterState {
    Absent,
    Present,
}

impl fmt::Display for ClusterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("absent"),
            Self::Present => f.write_str("present"),
        }
    }
}

/// The cluster the console manages.
///
/// Existence is not stored here: it is re-derived from the cluster tool every
/// time an operation needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterHandle {
    pub name: String,
    pub config_file: PathBuf,
}

impl ClusterHandle {
    pub fn new(name: impl Into<String>, config_file: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            config_file: config_file.into(),
        }
    }

    /// Decide existence from the output of `kind get clusters`.
    ///
    /// Matches whole lines so `shop` is not mistaken for `shop-staging`.
    pub fn state_from_listing(&self, listing: &str) -> ClusterState {
        if listing.lines().any(|line| line.trim() == self.name) {
            ClusterState::Present
        } else {
            ClusterState::Absent
        }
    }
}
