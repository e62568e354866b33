//! Client-side ordering of fetched listings.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::listing::{JobListing, SALARY_NOT_SPECIFIED};

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    CompanyAz,
    CompanyZa,
    SalaryHighLow,
    SalaryLowHigh,
}

impl SortOrder {
    pub const ALL: [SortOrder; 6] = [
        SortOrder::Newest,
        SortOrder::Oldest,
        SortOrder::CompanyAz,
        SortOrder::CompanyZa,
        SortOrder::SalaryHighLow,
        SortOrder::SalaryLowHigh,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::CompanyAz => "company-az",
            SortOrder::CompanyZa => "company-za",
            SortOrder::SalaryHighLow => "salary-high-low",
            SortOrder::SalaryLowHigh => "salary-low-high",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order {0:?}")]
pub struct UnknownSortOrder(pub String);

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| UnknownSortOrder(s.to_string()))
    }
}

/// Numeric value of a salary string: every digit run concatenated.
///
/// `"$70,000 - $90,000"` is 7000090000. Text without digits and
/// `"Not specified"` are 0; overlong digit strings saturate.
pub fn salary_value(salary: &str) -> u64 {
    if salary == SALARY_NOT_SPECIFIED {
        return 0;
    }
    let digits: String = DIGIT_RUN.find_iter(salary).map(|m| m.as_str()).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

fn compare_company(a: &JobListing, b: &JobListing) -> Ordering {
    a.company
        .to_lowercase()
        .cmp(&b.company.to_lowercase())
        .then_with(|| a.company.cmp(&b.company))
}

/// Stable sort returning a new collection. Undated listings go last for
/// `Newest` and first for `Oldest`.
pub fn sort_listings(listings: &[JobListing], order: SortOrder) -> Vec<JobListing> {
    let mut sorted = listings.to_vec();
    match order {
        SortOrder::Newest => sorted.sort_by(|a, b| b.posted_date.cmp(&a.posted_date)),
        SortOrder::Oldest => sorted.sort_by(|a, b| a.posted_date.cmp(&b.posted_date)),
        SortOrder::CompanyAz => sorted.sort_by(compare_company),
        SortOrder::CompanyZa => sorted.sort_by(|a, b| compare_company(b, a)),
        SortOrder::SalaryHighLow => sorted.sort_by_key(|l| std::cmp::Reverse(salary_value(&l.salary))),
        SortOrder::SalaryLowHigh => sorted.sort_by_key(|l| salary_value(&l.salary)),
    }
    sorted
}
