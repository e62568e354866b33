//! Plain-text rendering of jobs and listings.

use jobboard_core::{Facets, Job, JobListing, ListingView};

pub fn listing_card(listing: &JobListing) -> String {
    let badge = if listing.is_new { " [NEW]" } else { "" };
    let mut out = format!(
        "#{} {}{}\n    {} | {}\n    {} | {} | {}\n    posted {}",
        listing.id,
        listing.title,
        badge,
        listing.company,
        listing.location,
        listing.category,
        listing.experience_level,
        listing.salary,
        listing.posted_ago,
    );
    if !listing.tags.is_empty() {
        out.push_str(&format!(" | tags: {}", listing.tags.join(", ")));
    }
    out.push('\n');
    out
}

pub fn listing_view(view: ListingView<'_>) -> String {
    match view {
        ListingView::Loading => "Loading job listings...\n".to_string(),
        ListingView::Empty => "No jobs found matching your criteria.\n".to_string(),
        ListingView::Error(message) => format!("{message}\n"),
        ListingView::Jobs(listings) => {
            let mut out = format!("{} jobs found\n\n", listings.len());
            for listing in listings {
                out.push_str(&listing_card(listing));
                out.push('\n');
            }
            out
        }
    }
}

pub fn facets(facets: &Facets) -> String {
    let mut out = String::from("Countries:\n");
    for (country, count) in &facets.countries {
        out.push_str(&format!("  {country} ({count})\n"));
    }
    out.push_str("Cities:\n");
    for (city, count) in facets.cities.iter().take(5) {
        out.push_str(&format!("  {city} ({count})\n"));
    }
    out
}

pub fn job_detail(job: &Job) -> String {
    let field = |v: &Option<String>| v.clone().filter(|s| !s.is_empty()).unwrap_or_else(|| "-".to_string());
    let mut out = format!(
        "#{} {}\nCompany:  {}\nLocation: {}\nSalary:   {}\nURL:      {}\nPosted:   {}\nActive:   {}\n",
        job.id,
        job.title,
        job.company,
        field(&job.location),
        field(&job.salary),
        field(&job.url),
        job.posted_date,
        if job.is_active { "yes" } else { "no" },
    );
    if let Some(description) = job.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&format!("\n{description}\n"));
    }
    out
}
