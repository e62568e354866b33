use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// Timestamp format the backend stores `posted_date` in.
pub const POSTED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub salary: Option<String>,
    pub posted_date: String,
    pub is_active: bool,
}

#[derive(Deserialize)]
pub struct CreateJob {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub salary: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateJob {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub salary: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize, Default)]
pub struct ListParams {
    pub company: Option<String>,
    pub location: Option<String>,
    pub search: Option<String>,
}

#[derive(Default)]
pub struct Store {
    jobs: BTreeMap<i64, Job>,
    next_id: i64,
}

impl Store {
    /// Insert jobs as-is, keeping their ids and posted dates.
    pub fn with_jobs(jobs: Vec<Job>) -> Self {
        let next_id = jobs.iter().map(|j| j.id).max().unwrap_or(0);
        Self {
            jobs: jobs.into_iter().map(|j| (j.id, j)).collect(),
            next_id,
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with_jobs(Vec::new())
}

pub fn app_with_jobs(jobs: Vec<Job>) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::with_jobs(jobs)));
    let jobs = Router::new()
        .route("/jobs", get(list_jobs).post(create_job))
        .route("/jobs/{id}", get(get_job).put(update_job).delete(delete_job))
        .with_state(db);
    Router::new().nest("/api", jobs)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_jobs(listener: TcpListener, jobs: Vec<Job>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_jobs(jobs)).await
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
}

fn matches(job: &Job, params: &ListParams) -> bool {
    let filled = |v: &Option<String>| v.clone().filter(|s| !s.is_empty());
    if let Some(company) = filled(&params.company) {
        if !contains_ci(Some(job.company.as_str()), &company) {
            return false;
        }
    }
    if let Some(location) = filled(&params.location) {
        if !contains_ci(job.location.as_deref(), &location) {
            return false;
        }
    }
    if let Some(search) = filled(&params.search) {
        let hit = contains_ci(Some(job.title.as_str()), &search)
            || contains_ci(job.description.as_deref(), &search)
            || contains_ci(Some(job.company.as_str()), &search);
        if !hit {
            return false;
        }
    }
    true
}

async fn list_jobs(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<Vec<Job>> {
    let store = db.read().await;
    let mut jobs: Vec<Job> = store
        .jobs
        .values()
        .filter(|job| matches(job, &params))
        .cloned()
        .collect();
    // The fixed-width format sorts chronologically as text.
    jobs.sort_by(|a, b| b.posted_date.cmp(&a.posted_date).then(b.id.cmp(&a.id)));
    log::debug!("listing {} jobs", jobs.len());
    Json(jobs)
}

async fn create_job(
    State(db): State<Db>,
    Json(input): Json<CreateJob>,
) -> Result<(StatusCode, Json<Job>), (StatusCode, Json<Value>)> {
    let required = |v: &Option<String>| v.clone().filter(|s| !s.is_empty());
    let (Some(title), Some(company)) = (required(&input.title), required(&input.company)) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing required fields" })),
        ));
    };
    let mut store = db.write().await;
    store.next_id += 1;
    let job = Job {
        id: store.next_id,
        title,
        company,
        location: input.location,
        description: input.description,
        url: input.url,
        salary: input.salary,
        posted_date: Utc::now().format(POSTED_DATE_FORMAT).to_string(),
        is_active: true,
    };
    store.jobs.insert(job.id, job.clone());
    log::info!("created job {}", job.id);
    Ok((StatusCode::CREATED, Json(job)))
}

async fn get_job(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Job>, StatusCode> {
    let store = db.read().await;
    store.jobs.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_job(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateJob>,
) -> Result<Json<Job>, StatusCode> {
    let mut store = db.write().await;
    let job = store.jobs.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = input.title {
        job.title = title;
    }
    if let Some(company) = input.company {
        job.company = company;
    }
    if input.location.is_some() {
        job.location = input.location;
    }
    if input.description.is_some() {
        job.description = input.description;
    }
    if input.url.is_some() {
        job.url = input.url;
    }
    if input.salary.is_some() {
        job.salary = input.salary;
    }
    if let Some(is_active) = input.is_active {
        job.is_active = is_active;
    }
    Ok(Json(job.clone()))
}

async fn delete_job(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    let removed = store.jobs.remove(&id).map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND);
    if removed.is_ok() {
        log::info!("deleted job {id}");
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: i64, company: &str, location: Option<&str>) -> Job {
        Job {
            id,
            title: "Actuarial Analyst".to_string(),
            company: company.to_string(),
            location: location.map(str::to_string),
            description: Some("Associate level".to_string()),
            url: None,
            salary: None,
            posted_date: "2024-05-01 09:30:00".to_string(),
            is_active: true,
        }
    }

    #[test]
    fn job_serializes_nulls_for_missing_columns() {
        let json = serde_json::to_value(job(1, "Acme", None)).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["location"], Value::Null);
        assert_eq!(json["posted_date"], "2024-05-01 09:30:00");
    }

    #[test]
    fn filters_are_case_insensitive_substrings() {
        let j = job(1, "Acme Insurance", Some("London, UK"));
        let params = |company: Option<&str>, location: Option<&str>, search: Option<&str>| ListParams {
            company: company.map(str::to_string),
            location: location.map(str::to_string),
            search: search.map(str::to_string),
        };
        assert!(matches(&j, &params(Some("acme"), None, None)));
        assert!(matches(&j, &params(None, Some("LONDON"), None)));
        assert!(matches(&j, &params(None, None, Some("associate"))));
        assert!(matches(&j, &params(Some(""), None, None)));
        assert!(!matches(&j, &params(Some("globex"), None, None)));
        assert!(!matches(&job(2, "Acme", None), &params(None, Some("london"), None)));
    }

    #[test]
    fn seeded_store_continues_ids_after_max() {
        let store = Store::with_jobs(vec![job(4, "A", None), job(9, "B", None)]);
        assert_eq!(store.next_id, 9);
        assert_eq!(store.jobs.len(), 2);
    }

    #[test]
    fn update_job_all_fields_optional() {
        let input: UpdateJob = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.title.is_none());
        assert!(input.is_active.is_none());
    }
}
