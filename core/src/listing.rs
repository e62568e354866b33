//! Display projection of a `Job`.
//!
//! A `JobListing` is a pure function of the job it came from and the wall
//! clock at fetch time. It is never edited in place; a new fetch rebuilds
//! every listing.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::types::Job;

/// Display text for a job without salary information.
pub const SALARY_NOT_SPECIFIED: &str = "Not specified";

/// Experience level shown on every card.
pub const EXPERIENCE_LEVEL: &str = "Analyst (Experienced)";

/// Postings younger than this many whole days are flagged as new.
const NEW_WITHIN_DAYS: i64 = 2;

/// Category inferred from the job description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    ActuaryFellow,
    ActuaryAssociate,
    Analyst,
}

impl Category {
    /// Case-sensitive substring match; "Fellow" is checked before "Associate".
    pub fn infer(description: &str) -> Self {
        if description.contains("Fellow") {
            Category::ActuaryFellow
        } else if description.contains("Associate") {
            Category::ActuaryAssociate
        } else {
            Category::Analyst
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::ActuaryFellow => "Actuary (Fellow)",
            Category::ActuaryAssociate => "Actuary (Associate)",
            Category::Analyst => "Analyst",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A job with the fields a listing card needs precomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobListing {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub country: String,
    pub city: String,
    /// Salary text, or `SALARY_NOT_SPECIFIED`.
    pub salary: String,
    pub tags: Vec<String>,
    pub experience_level: &'static str,
    pub category: Category,
    pub is_new: bool,
    pub posted_ago: String,
    pub posted_date: Option<DateTime<Utc>>,
}

impl JobListing {
    pub fn from_job(job: &Job, now: DateTime<Utc>) -> Self {
        let location = job.location.clone().unwrap_or_default();
        let (city, country) = split_location(&location);

        let posted_date = parse_posted_date(&job.posted_date);
        let (posted_ago, is_new) = match posted_date {
            Some(posted) => {
                let age = Age::between(posted, now);
                (age.to_string(), age.days < NEW_WITHIN_DAYS)
            }
            None => {
                log::debug!("job {} has unparseable posted_date {:?}", job.id, job.posted_date);
                (String::new(), false)
            }
        };

        let tags = [&country, &city]
            .into_iter()
            .filter(|s| !s.is_empty())
            .cloned()
            .collect();

        let salary = match job.salary.as_deref() {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => SALARY_NOT_SPECIFIED.to_string(),
        };

        Self {
            id: job.id,
            title: job.title.clone(),
            company: job.company.clone(),
            location,
            country,
            city,
            salary,
            tags,
            experience_level: EXPERIENCE_LEVEL,
            category: Category::infer(job.description.as_deref().unwrap_or_default()),
            is_new,
            posted_ago,
            posted_date,
        }
    }
}

/// Transform a fetched batch, preserving backend order.
pub fn transform(jobs: &[Job], now: DateTime<Utc>) -> Vec<JobListing> {
    jobs.iter().map(|job| JobListing::from_job(job, now)).collect()
}

/// First comma segment is the city; the last one is the country when there
/// is more than one segment.
pub fn split_location(location: &str) -> (String, String) {
    let parts: Vec<&str> = location.split(',').map(str::trim).collect();
    let city = parts.first().copied().unwrap_or_default().to_string();
    let country = if parts.len() > 1 {
        parts[parts.len() - 1].to_string()
    } else {
        String::new()
    };
    (city, country)
}

/// Parse the backend timestamp. Naive forms are taken as UTC.
pub fn parse_posted_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Whole hours and days between two instants, regardless of direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Age {
    hours: i64,
    days: i64,
}

impl Age {
    fn between(posted: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let elapsed = (now - posted).abs();
        Self {
            hours: elapsed.num_hours(),
            days: elapsed.num_days(),
        }
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.days == 0 {
            write!(f, "{}h ago", self.hours)
        } else {
            write!(f, "{}d ago", self.days)
        }
    }
}

/// Listing counts per country and per city, for the filter sidebar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub countries: Vec<(String, usize)>,
    pub cities: Vec<(String, usize)>,
}

pub fn facets(listings: &[JobListing]) -> Facets {
    Facets {
        countries: count_by(listings, |l| &l.country),
        cities: count_by(listings, |l| &l.city),
    }
}

/// Most frequent first, ties by name; empty keys are skipped.
fn count_by(listings: &[JobListing], key: impl Fn(&JobListing) -> &String) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for listing in listings {
        let k = key(listing);
        if !k.is_empty() {
            *counts.entry(k.as_str()).or_default() += 1;
        }
    }
    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, n)| (k.to_string(), n))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}
