// src/pool.rs

//! Ordered candidate-pool scan
//!
//! Both candidate pools are ordered best-first, so resolution is one shared
//! contract: the first artifact in scan order whose name equals the requested
//! name or its alias and whose version satisfies the range. Pool-specific
//! filters (such as game-version compatibility) are applied by the caller
//! before the scan.

use semver::{Version, VersionReq};

/// One scannable artifact in an ordered candidate pool
pub trait Candidate {
    fn name(&self) -> &str;
    fn version(&self) -> &Version;
}

/// First candidate matching `(name | alias, range)` in scan order
pub fn first_match<'p, T, I>(
    pool: I,
    name: &str,
    alias: Option<&str>,
    range: &VersionReq,
) -> Option<&'p T>
where
    T: Candidate + 'p,
    I: IntoIterator<Item = &'p T>,
{
    pool.into_iter().find(|candidate| {
        (candidate.name() == name || alias.is_some_and(|a| candidate.name() == a))
            && range.matches(candidate.version())
    })
}
