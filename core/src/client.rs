//! Stateless request builder and response parser for the job API.
//!
//! # Design
//! `JobClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`; the host executes the round-trip in
//! between. Nothing is retried or cached. Failures pass through as
//! `ApiError` and callers decide what to show.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateJob, Job, JobQuery, UpdateJob};

/// Base URL used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Synchronous, stateless client for the job API.
#[derive(Debug, Clone)]
pub struct JobClient {
    base_url: String,
}

impl Default for JobClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl JobClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_jobs(&self, query: &JobQuery) -> HttpRequest {
        let mut url = format!("{}/jobs", self.base_url);
        let params = query.params();
        if !params.is_empty() {
            let encoded: Vec<String> = params
                .into_iter()
                .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
                .collect();
            url.push('?');
            url.push_str(&encoded.join("&"));
        }
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_job(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/jobs/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Fails with `ApiError::Validation` when title or company is blank, in
    /// which case no request exists to send.
    pub fn build_create_job(&self, input: &CreateJob) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/jobs", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_update_job(&self, id: i64, input: &UpdateJob) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: format!("{}/jobs/{id}", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete_job(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/jobs/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_jobs(&self, response: HttpResponse) -> Result<Vec<Job>, ApiError> {
        check_status(&response, &[200])?;
        decode(&response)
    }

    pub fn parse_get_job(&self, response: HttpResponse) -> Result<Job, ApiError> {
        check_status(&response, &[200])?;
        decode(&response)
    }

    pub fn parse_create_job(&self, response: HttpResponse) -> Result<Job, ApiError> {
        check_status(&response, &[201])?;
        decode(&response)
    }

    pub fn parse_update_job(&self, response: HttpResponse) -> Result<Job, ApiError> {
        check_status(&response, &[200])?;
        decode(&response)
    }

    /// Accepts 204, and 200 for backends that answer with a message body.
    pub fn parse_delete_job(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &[200, 204])
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: &[u16]) -> Result<(), ApiError> {
    if expected.contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
