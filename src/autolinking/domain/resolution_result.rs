use super::DependencyResolution;
use crate::autolinking::policies::DuplicatePolicy;
use indexmap::IndexMap;
use serde::Serialize;

/// Outcome of recording a discovery into a `ResolutionResult`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discovery {
    /// First time this name was seen; the resolution is now canonical
    Canonical,
    /// The name was known at another real path; recorded as a duplicate
    Duplicate,
    /// The name was known at the same real path; nothing changed
    SameInstall,
}

/// ResolutionResult aggregate - package name to its canonical resolution
///
/// Keeps discovery order, so iteration (and serialized output) follows the
/// order in which the scanner found packages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolutionResult {
    entries: IndexMap<String, DependencyResolution>,
}

impl ResolutionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&DependencyResolution> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DependencyResolution> {
        self.entries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Resolutions that have at least one duplicate install
    pub fn with_duplicates(&self) -> impl Iterator<Item = &DependencyResolution> {
        self.entries.values().filter(|r| r.has_duplicates())
    }

    pub fn duplicate_count(&self) -> usize {
        self.with_duplicates().count()
    }

    /// Records a discovery made during a single scan: the first discovery of
    /// a name wins, later ones become duplicates.
    pub fn record(&mut self, resolution: DependencyResolution) -> Discovery {
        match self.entries.get_mut(resolution.name()) {
            Some(canonical) => {
                if DuplicatePolicy::record(canonical, resolution) {
                    Discovery::Duplicate
                } else {
                    Discovery::SameInstall
                }
            }
            None => {
                self.entries
                    .insert(resolution.name().to_string(), resolution);
                Discovery::Canonical
            }
        }
    }

    /// Merges another source's results into this one, resolving name clashes
    /// with `DuplicatePolicy::merge`. Existing entries keep their position.
    pub fn merge(&mut self, other: ResolutionResult) {
        for (name, incoming) in other.entries {
            match self.entries.get_mut(&name) {
                Some(existing) => {
                    let previous = existing.clone();
                    *existing = DuplicatePolicy::merge(previous, incoming);
                }
                None => {
                    self.entries.insert(name, incoming);
                }
            }
        }
    }

    /// Merges results in priority order (earlier results win ties)
    pub fn merge_all(results: impl IntoIterator<Item = ResolutionResult>) -> Self {
        let mut merged = Self::new();
        for result in results {
            merged.merge(result);
        }
        merged
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&DependencyResolution) -> bool) {
        self.entries.retain(|_, resolution| keep(resolution));
    }
}

impl IntoIterator for ResolutionResult {
    type Item = DependencyResolution;
    type IntoIter = indexmap::map::IntoValues<String, DependencyResolution>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

impl FromIterator<DependencyResolution> for ResolutionResult {
    fn from_iter<I: IntoIterator<Item = DependencyResolution>>(iter: I) -> Self {
        let mut result = Self::new();
        for resolution in iter {
            result.record(resolution);
        }
        result
    }
}
