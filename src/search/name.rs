use serde::Serialize;

use crate::reference::{ReferenceData, SubstanceRecord};

/// Outcome of a name search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NameSearch<'a> {
    /// The query was empty after trimming; no search was performed
    Skipped,
    /// No substance name contains the query
    NotFound,
    /// Matching substances in table order
    Found(Vec<&'a SubstanceRecord>),
}

impl<'a> NameSearch<'a> {
    /// Matching substances (empty unless [`NameSearch::Found`])
    pub fn matches(&self) -> &[&'a SubstanceRecord] {
        match self {
            NameSearch::Found(matches) => matches,
            _ => &[],
        }
    }

    /// Whether a search was run
    pub fn was_performed(&self) -> bool {
        !matches!(self, NameSearch::Skipped)
    }
}

/// Find substances whose name contains `query`, ignoring case.
///
/// An empty (or whitespace-only) query does not match everything; it yields
/// [`NameSearch::Skipped`].
pub fn search_by_name<'a>(reference: &'a ReferenceData, query: &str) -> NameSearch<'a> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return NameSearch::Skipped;
    }

    let matches: Vec<_> = reference
        .substances()
        .iter()
        .filter(|s| s.name.to_lowercase().contains(&needle))
        .collect();

    if matches.is_empty() {
        NameSearch::NotFound
    } else {
        NameSearch::Found(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> ReferenceData {
        ReferenceData::new(
            vec![
                SubstanceRecord::new("Cocaína"),
                SubstanceRecord::new("Benzoilecgonina"),
                SubstanceRecord::new("Ecgonina metil éster"),
            ],
            Vec::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_case_insensitive_substring() {
        let data = library();
        let result = search_by_name(&data, "  ECGONINA ");

        let names: Vec<_> = result.matches().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Benzoilecgonina", "Ecgonina metil éster"]);
    }

    #[test]
    fn test_accented_query() {
        let data = library();
        assert_eq!(search_by_name(&data, "COCAÍNA").matches().len(), 1);
        assert_eq!(search_by_name(&data, "ÉSTER").matches().len(), 1);
    }

    #[test]
    fn test_empty_query_is_skipped() {
        let data = library();
        assert_eq!(search_by_name(&data, "   "), NameSearch::Skipped);
        assert!(!search_by_name(&data, "").was_performed());
    }

    #[test]
    fn test_not_found() {
        let data = library();
        let result = search_by_name(&data, "heroína");
        assert_eq!(result, NameSearch::NotFound);
        assert!(result.matches().is_empty());
    }
}
