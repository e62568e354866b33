//! Job DTOs exchanged with the REST API.
//!
//! # Design
//! These mirror the backend's JSON but are defined independently of the
//! mock-server crate; the integration tests catch schema drift. Columns the
//! backend allows to be null are `Option<String>` so a null never fails
//! deserialization of a whole list.

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ValidationErrors};

/// A job posting as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    pub posted_date: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Request payload for creating a job. The server assigns `id`,
/// `posted_date` and `is_active`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateJob {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub salary: String,
}

impl CreateJob {
    /// Rejects blank title or company before anything goes on the wire.
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = ValidationErrors::default();
        check_title(&mut errors, &self.title);
        check_company(&mut errors, &self.company);
        errors.into_result()
    }
}

/// Request payload for updating a job. Only present fields are sent; omitted
/// fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateJob {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UpdateJob {
    /// Same rule as `CreateJob::validate`, applied to present fields only.
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = ValidationErrors::default();
        if let Some(title) = &self.title {
            check_title(&mut errors, title);
        }
        if let Some(company) = &self.company {
            check_company(&mut errors, company);
        }
        errors.into_result()
    }
}

fn check_title(errors: &mut ValidationErrors, title: &str) {
    if title.trim().is_empty() {
        errors.push("title", "Job title is required");
    }
}

fn check_company(errors: &mut ValidationErrors, company: &str) {
    if company.trim().is_empty() {
        errors.push("company", "Company name is required");
    }
}

/// Filters understood by the list endpoint. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl JobQuery {
    /// Query parameters in wire order, skipping absent and empty values.
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        [
            ("company", self.company.as_deref()),
            ("location", self.location.as_deref()),
            ("search", self.search.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.params().is_empty()
    }
}
