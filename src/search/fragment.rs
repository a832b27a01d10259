use std::collections::BTreeSet;

use crate::reference::SubstanceRecord;

/// Keeps substances whose fragment set contains every observed fragment
#[derive(Debug, Clone, Default)]
pub struct FragmentFilter {
    observed: BTreeSet<u32>,
}

/// Result of applying a [`FragmentFilter`]
#[derive(Debug, Clone)]
pub struct FragmentMatches<'a> {
    /// Substances that passed, in input order
    pub matches: Vec<&'a SubstanceRecord>,
    /// Candidates dropped because their fragment field could not be parsed
    pub malformed: usize,
}

impl FragmentFilter {
    /// Build a filter from observed fragments; order and duplicates are ignored
    pub fn new(observed: &[u32]) -> Self {
        Self {
            observed: observed.iter().copied().collect(),
        }
    }

    /// An empty filter lets every candidate through
    pub fn is_noop(&self) -> bool {
        self.observed.is_empty()
    }

    /// Whether a substance passes.
    ///
    /// With a non-empty filter, a substance with a malformed fragment field
    /// never passes.
    pub fn passes(&self, substance: &SubstanceRecord) -> bool {
        if self.is_noop() {
            return true;
        }
        match &substance.fragments {
            Some(fragments) => {
                let known: BTreeSet<u32> = fragments.iter().copied().collect();
                self.observed.is_subset(&known)
            }
            None => false,
        }
    }

    /// Apply the filter to a candidate list
    pub fn apply<'a>(&self, candidates: &[&'a SubstanceRecord]) -> FragmentMatches<'a> {
        if self.is_noop() {
            return FragmentMatches {
                matches: candidates.to_vec(),
                malformed: 0,
            };
        }

        let malformed = candidates
            .iter()
            .filter(|s| s.has_malformed_fragments())
            .count();
        let matches = candidates
            .iter()
            .copied()
            .filter(|s| self.passes(s))
            .collect();

        FragmentMatches { matches, malformed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn substance(name: &str, fragments: &str) -> SubstanceRecord {
        SubstanceRecord::new(name).with_fragment_text(fragments)
    }

    #[test]
    fn test_empty_filter_is_noop() {
        let broken = substance("Broken", "91;105");
        let filter = FragmentFilter::new(&[]);

        let result = filter.apply(&[&broken]);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.malformed, 0);
    }

    #[test]
    fn test_superset_match() {
        let toluene = substance("Tolueno", "91, 92, 65");
        let styrene = substance("Estireno", "104,78,103");
        let filter = FragmentFilter::new(&[92, 91, 91]);

        assert!(filter.passes(&toluene));
        assert!(!filter.passes(&styrene));
    }

    #[test]
    fn test_malformed_field_excluded() {
        let good = substance("Good", "91,105,77");
        let broken = substance("Broken", "91;105");
        let filter = FragmentFilter::new(&[91, 105]);

        let result = filter.apply(&[&good, &broken]);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].name, "Good");
        assert_eq!(result.malformed, 1);
    }

    #[test]
    fn test_empty_field_never_matches_fragments() {
        let empty = substance("Empty", "");
        assert!(!FragmentFilter::new(&[44]).passes(&empty));
    }
}
