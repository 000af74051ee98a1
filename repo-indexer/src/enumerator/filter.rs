//! Inclusion filters for enumerated repositories.

use crate::source::RepositoryHandle;

/// Which repositories an enumeration keeps. Both kinds are included by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepositoryFilter {
    /// Keep forked repositories.
    pub include_forks: bool,

    /// Keep archived repositories.
    pub include_archived: bool,
}

impl Default for RepositoryFilter {
    fn default() -> Self {
        Self {
            include_forks: true,
            include_archived: true,
        }
    }
}

impl RepositoryFilter {
    /// Creates a filter.
    #[must_use]
    pub fn new(include_forks: bool, include_archived: bool) -> Self {
        Self {
            include_forks,
            include_archived,
        }
    }

    /// Returns why `handle` is excluded, or `None` if it is kept.
    #[must_use]
    pub fn exclusion_reason(&self, handle: &RepositoryHandle) -> Option<&'static str> {
        if !self.include_forks && handle.is_fork() {
            return Some("fork");
        }
        if !self.include_archived && handle.is_archived() {
            return Some("archived");
        }
        None
    }

    /// Returns true if `handle` is kept.
    #[must_use]
    pub fn admits(&self, handle: &RepositoryHandle) -> bool {
        self.exclusion_reason(handle).is_none()
    }
}
