//! Turning the search box and filter chips into a `JobQuery`.

use std::collections::HashSet;

use crate::listing::JobListing;
use crate::types::JobQuery;

/// What the user currently has selected in the listing view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub search: String,
    pub company: String,
    pub location: String,
}

/// Distinct companies and locations seen in the latest successful fetch,
/// in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownValues {
    pub companies: Vec<String>,
    pub locations: Vec<String>,
}

impl KnownValues {
    pub fn from_listings(listings: &[JobListing]) -> Self {
        Self {
            companies: distinct(listings.iter().map(|l| l.company.as_str())),
            locations: distinct(listings.iter().map(|l| l.location.as_str())),
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Resolve the effective list query.
///
/// Explicit company/location filters win. Otherwise a non-empty search term
/// is matched case-insensitively against known companies, then known
/// locations; with no match it goes to the server as a full-text search.
pub fn resolve_query(filter: &ListingFilter, known: &KnownValues) -> JobQuery {
    let company = non_empty(&filter.company);
    let location = non_empty(&filter.location);
    if company.is_some() || location.is_some() {
        return JobQuery {
            company,
            location,
            search: None,
        };
    }

    let term = filter.search.trim().to_lowercase();
    if term.is_empty() {
        return JobQuery::default();
    }

    if let Some(company) = first_containing(&known.companies, &term) {
        log::debug!("search {term:?} matched company {company:?}");
        return JobQuery {
            company: Some(company.to_string()),
            ..JobQuery::default()
        };
    }
    if let Some(location) = first_containing(&known.locations, &term) {
        log::debug!("search {term:?} matched location {location:?}");
        return JobQuery {
            location: Some(location.to_string()),
            ..JobQuery::default()
        };
    }

    log::debug!("using general search for {term:?}");
    JobQuery {
        search: Some(term),
        ..JobQuery::default()
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

fn first_containing<'a>(values: &'a [String], term: &str) -> Option<&'a str> {
    values
        .iter()
        .find(|v| v.to_lowercase().contains(term))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known() -> KnownValues {
        KnownValues {
            companies: vec!["Acme Insurance".to_string(), "Globex Re".to_string()],
            locations: vec!["London, UK".to_string(), "Acmeville, USA".to_string()],
        }
    }

    fn search(text: &str) -> ListingFilter {
        ListingFilter {
            search: text.to_string(),
            ..ListingFilter::default()
        }
    }

    #[test]
    fn explicit_filters_take_precedence_over_search() {
        let filter = ListingFilter {
            search: "globex".to_string(),
            company: "Acme Insurance".to_string(),
            location: String::new(),
        };
        let query = resolve_query(&filter, &known());
        assert_eq!(query.company.as_deref(), Some("Acme Insurance"));
        assert!(query.location.is_none());
        assert!(query.search.is_none());
    }

    #[test]
    fn search_matching_a_company_becomes_company_filter() {
        let query = resolve_query(&search("GLOBEX"), &known());
        assert_eq!(query.company.as_deref(), Some("Globex Re"));
        assert!(query.search.is_none());
    }

    #[test]
    fn company_match_wins_over_location_match() {
        let query = resolve_query(&search("acme"), &known());
        assert_eq!(query.company.as_deref(), Some("Acme Insurance"));
        assert!(query.location.is_none());
    }

    #[test]
    fn search_matching_a_location_becomes_location_filter() {
        let query = resolve_query(&search("london"), &known());
        assert_eq!(query.location.as_deref(), Some("London, UK"));
    }

    #[test]
    fn unmatched_search_is_sent_lowercased() {
        let query = resolve_query(&search("  Pricing Actuary "), &known());
        assert_eq!(query.search.as_deref(), Some("pricing actuary"));
        assert!(query.company.is_none());
    }

    #[test]
    fn blank_search_fetches_everything() {
        assert!(resolve_query(&search("   "), &known()).is_empty());
    }

    #[test]
    fn known_values_are_distinct_in_first_seen_order() {
        let listing = |company: &str, location: &str| JobListing {
            company: company.to_string(),
            location: location.to_string(),
            ..crate::test_support::listing(1)
        };
        let known = KnownValues::from_listings(&[
            listing("Globex", "Paris, France"),
            listing("Acme", "London, UK"),
            listing("Globex", "London, UK"),
        ]);
        assert_eq!(known.companies, vec!["Globex", "Acme"]);
        assert_eq!(known.locations, vec!["Paris, France", "London, UK"]);
    }
}
