use crate::autolinking::domain::{DependencyResolution, ResolutionSource};

/// DuplicatePolicy - decides which install of a package name is canonical
///
/// Mirrors how package managers hoist: the install closest to the project
/// root wins, and among equally deep installs the one discovered first wins.
/// Every other install at a different real path is kept as a duplicate for
/// diagnostics; installs that share the canonical real path are the same
/// package reached through another link and are not duplicates.
pub struct DuplicatePolicy;

impl DuplicatePolicy {
    /// Records a later discovery against the canonical resolution.
    ///
    /// Used within a single breadth-first scan, where discovery order already
    /// guarantees `canonical` is at least as shallow as `discovered`.
    ///
    /// # Returns
    /// `true` if `discovered` was a different install and got recorded
    pub fn record(canonical: &mut DependencyResolution, discovered: DependencyResolution) -> bool {
        canonical.push_duplicate(discovered)
    }

    /// Merges two resolutions of the same name coming from different sources.
    ///
    /// An explicit project-config resolution always wins and absorbs nothing.
    /// Otherwise the shallower resolution wins (`a` on ties) and the other one,
    /// along with its own duplicates, is folded into its duplicate list.
    pub fn merge(a: DependencyResolution, b: DependencyResolution) -> DependencyResolution {
        if a.source() == ResolutionSource::ProjectConfigLocal {
            return a;
        }
        if b.source() == ResolutionSource::ProjectConfigLocal {
            return b;
        }

        let (mut target, mut duplicate) = if b.depth() < a.depth() { (b, a) } else { (a, b) };
        let nested = duplicate.take_duplicates();
        target.push_duplicate(duplicate);
        for resolution in nested {
            target.push_duplicate(resolution);
        }
        target
    }
}
