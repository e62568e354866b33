//! Listing view state machine.
//!
//! # Design
//! `update` is a pure function from `(ListingState, Msg)` to the next state
//! plus the effects the host must run. Every refetch bumps a generation
//! counter and the resulting `Effect::Fetch` carries it; a response tagged
//! with an older generation is dropped, so a slow early response can never
//! overwrite a newer one. Sorting happens locally on the fetch-order
//! collection and never refetches.

use chrono::{DateTime, Utc};

use crate::error::{ApiError, Operation};
use crate::listing::{transform, JobListing};
use crate::query::{resolve_query, KnownValues, ListingFilter};
use crate::sort::{sort_listings, SortOrder};
use crate::types::{Job, JobQuery};

/// Where the listing view is in its fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Loading,
    /// Listings in display order.
    Success(Vec<JobListing>),
    Error(String),
}

/// What to draw. An empty result is its own state, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingView<'a> {
    Loading,
    Empty,
    Jobs(&'a [JobListing]),
    Error(&'a str),
}

#[derive(Debug)]
pub enum Msg {
    /// Fetch again with the current filter.
    Refresh,
    /// Search box text changed. Blank text clears company/location filters.
    SearchChanged(String),
    /// A company chip was clicked.
    CompanyFilterSelected(String),
    /// A location chip was clicked.
    LocationFilterSelected(String),
    FiltersCleared,
    SortChanged(SortOrder),
    FetchSucceeded {
        generation: u64,
        jobs: Vec<Job>,
        now: DateTime<Utc>,
    },
    FetchFailed {
        generation: u64,
        error: ApiError,
    },
    /// The host deleted this job on the server.
    JobDeleted(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch { generation: u64, query: JobQuery },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingState {
    filter: ListingFilter,
    sort: SortOrder,
    known: KnownValues,
    generation: u64,
    phase: Phase,
    /// Listings in the order the backend returned them.
    fetched: Vec<JobListing>,
}

impl Default for ListingState {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingState {
    pub fn new() -> Self {
        Self {
            filter: ListingFilter::default(),
            sort: SortOrder::default(),
            known: KnownValues::default(),
            generation: 0,
            phase: Phase::Loading,
            fetched: Vec::new(),
        }
    }

    pub fn filter(&self) -> &ListingFilter {
        &self.filter
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn known(&self) -> &KnownValues {
        &self.known
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Display-ordered listings, empty unless the last fetch succeeded.
    pub fn listings(&self) -> &[JobListing] {
        match &self.phase {
            Phase::Success(listings) => listings,
            Phase::Loading | Phase::Error(_) => &[],
        }
    }

    pub fn view(&self) -> ListingView<'_> {
        match &self.phase {
            Phase::Loading => ListingView::Loading,
            Phase::Success(listings) if listings.is_empty() => ListingView::Empty,
            Phase::Success(listings) => ListingView::Jobs(listings),
            Phase::Error(message) => ListingView::Error(message),
        }
    }

    /// Only generations handed out by `refetch` count; 0 was never issued.
    fn is_current(&self, generation: u64) -> bool {
        generation != 0 && generation == self.generation
    }

    fn refetch(&mut self) -> Vec<Effect> {
        self.generation += 1;
        self.phase = Phase::Loading;
        let query = resolve_query(&self.filter, &self.known);
        vec![Effect::Fetch {
            generation: self.generation,
            query,
        }]
    }

    fn resort(&mut self) {
        if let Phase::Success(_) = self.phase {
            self.phase = Phase::Success(sort_listings(&self.fetched, self.sort));
        }
    }
}

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ListingState, msg: Msg) -> (ListingState, Vec<Effect>) {
    let effects = match msg {
        Msg::Refresh => state.refetch(),
        Msg::SearchChanged(text) => {
            if text.trim().is_empty() {
                state.filter.company.clear();
                state.filter.location.clear();
            }
            state.filter.search = text;
            state.refetch()
        }
        Msg::CompanyFilterSelected(company) => {
            state.filter.location.clear();
            state.filter.search = company.clone();
            state.filter.company = company;
            state.refetch()
        }
        Msg::LocationFilterSelected(location) => {
            state.filter.company.clear();
            state.filter.search = location.clone();
            state.filter.location = location;
            state.refetch()
        }
        Msg::FiltersCleared => {
            state.filter = ListingFilter::default();
            state.refetch()
        }
        Msg::SortChanged(order) => {
            state.sort = order;
            state.resort();
            Vec::new()
        }
        Msg::FetchSucceeded {
            generation,
            jobs,
            now,
        } => {
            if !state.is_current(generation) {
                log::debug!(
                    "dropping stale listing response (generation {generation}, latest {})",
                    state.generation
                );
                return (state, Vec::new());
            }
            let fetched = transform(&jobs, now);
            state.known = KnownValues::from_listings(&fetched);
            state.phase = Phase::Success(sort_listings(&fetched, state.sort));
            state.fetched = fetched;
            Vec::new()
        }
        Msg::FetchFailed { generation, error } => {
            if !state.is_current(generation) {
                log::debug!("dropping stale listing failure (generation {generation}): {error}");
                return (state, Vec::new());
            }
            log::warn!("failed to fetch jobs: {error}");
            state.fetched.clear();
            state.phase = Phase::Error(Operation::LoadListings.failure_message().to_string());
            Vec::new()
        }
        Msg::JobDeleted(id) => {
            state.fetched.retain(|l| l.id != id);
            if let Phase::Success(listings) = &mut state.phase {
                listings.retain(|l| l.id != id);
            }
            Vec::new()
        }
    };

    (state, effects)
}
