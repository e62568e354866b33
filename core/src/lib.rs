//! Client core for the job board.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values for the job
//! REST API without touching the network (host-does-IO). On top of the raw
//! client sits the listing pipeline: resolve the effective query, transform
//! fetched jobs into display listings, sort them, and drive the listing
//! view through `view::update`.
//!
//! # Design
//! - `JobClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*` so the I/O
//!   boundary is explicit and every pipeline stage is a pure function.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod listing;
pub mod query;
pub mod sort;
pub mod types;
pub mod view;

pub use client::{JobClient, DEFAULT_BASE_URL};
pub use error::{ApiError, FieldError, Operation, ValidationErrors};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use listing::{facets, transform, Category, Facets, JobListing};
pub use query::{resolve_query, KnownValues, ListingFilter};
pub use sort::{salary_value, sort_listings, SortOrder};
pub use types::{CreateJob, Job, JobQuery, UpdateJob};
pub use view::{update, Effect, ListingState, ListingView, Msg, Phase};
