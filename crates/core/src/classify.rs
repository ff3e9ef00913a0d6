//! Ontology type classification.

/// Type prefixes that mark an annotation as a brand/organization.
/// Both British and American spellings appear in the wild.
const INCLUDED_PREFIXES: [&str; 4] = [
    "http://dbpedia.org/ontology/Brand",
    "http://dbpedia.org/ontology/Company",
    "http://dbpedia.org/ontology/Organisation",
    "http://dbpedia.org/ontology/Organization",
];

/// Type prefixes that disqualify an annotation outright, even when an
/// included prefix is also present.
const EXCLUDED_PREFIXES: [&str; 3] = [
    "http://dbpedia.org/ontology/Person",
    "http://dbpedia.org/ontology/Place",
    "http://dbpedia.org/ontology/ProgrammingLanguage",
];

/// Decide whether a set of ontology type URIs denotes a brand/organization.
///
/// Matching is by URI prefix (`starts_with`), not equality, so sub-typed
/// URIs still classify. Exclusion wins over inclusion. An empty type set
/// is never brand-like.
pub fn is_brand_like(types: &[String]) -> bool {
    if types
        .iter()
        .any(|t| EXCLUDED_PREFIXES.iter().any(|ex| t.starts_with(ex)))
    {
        return false;
    }
    types
        .iter()
        .any(|t| INCLUDED_PREFIXES.iter().any(|inc| t.starts_with(inc)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uris(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_types_never_brand_like() {
        assert!(!is_brand_like(&[]));
    }

    #[test]
    fn test_included_prefixes() {
        for uri in [
            "http://dbpedia.org/ontology/Brand",
            "http://dbpedia.org/ontology/Company",
            "http://dbpedia.org/ontology/Organisation",
            "http://dbpedia.org/ontology/Organization",
        ] {
            assert!(is_brand_like(&uris(&[uri])), "expected brand-like: {}", uri);
        }
    }

    #[test]
    fn test_sub_typed_uri_matches_by_prefix() {
        assert!(is_brand_like(&uris(&[
            "http://dbpedia.org/ontology/Organisation/NonProfitOrganisation"
        ])));
    }

    #[test]
    fn test_exclusion_wins_over_inclusion() {
        assert!(!is_brand_like(&uris(&[
            "http://dbpedia.org/ontology/Company",
            "http://dbpedia.org/ontology/Person",
        ])));
        // Order does not matter
        assert!(!is_brand_like(&uris(&[
            "http://dbpedia.org/ontology/Person",
            "http://dbpedia.org/ontology/Company",
        ])));
    }

    #[test]
    fn test_excluded_only() {
        assert!(!is_brand_like(&uris(&["http://dbpedia.org/ontology/Place"])));
        assert!(!is_brand_like(&uris(&[
            "http://dbpedia.org/ontology/ProgrammingLanguage"
        ])));
    }

    #[test]
    fn test_unrelated_types() {
        assert!(!is_brand_like(&uris(&[
            "http://dbpedia.org/ontology/Device",
            "http://dbpedia.org/ontology/Work",
        ])));
    }
}
