//! HTTP client for the school-management backend.

use std::time::Duration;

use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use url::Url;

use crate::{
    query::{ClassQuery, FinancialQuery, ListQuery, Query, StudentQuery, TeacherQuery},
    resource::Resource,
    types::{
        ClassAnalytics, ClassDraft, ClassRecord, ErrorBody, FinancialSummary, PaginatedResponse,
        StudentDraft, StudentRecord, TeacherDraft, TeacherRecord,
    },
    Error,
};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";

/// HTTP client for the backend REST surface.
///
/// Every call builds a fresh `reqwest::Client`. No timeout is applied unless
/// one is set with [`Client::with_timeout`], so a hung backend keeps the call
/// pending.
#[derive(Clone, Debug)]
pub struct Client {
    /// Base URL for the API, including the `/api` prefix.
    base_api_url: String,
    timeout: Option<Duration>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at a backend on localhost.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL. Used for configuration and
    /// for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    /// Applies a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, path: &str) -> Result<Url, Error> {
        Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })
    }

    async fn send<T, B>(&self, method: Method, url: Url, body: Option<&B>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            tracing::error!("Failed to build HTTP client: {}", e);
            Error::RequestFailed
        })?;

        tracing::debug!("{} {}", method, url);
        let mut request = client
            .request(method.clone(), url.clone())
            .header("accept", "application/json, text/plain, */*");
        if let Some(body) = body {
            request = request.json(body);
        }
        let resp = request.send().await.map_err(|e| {
            tracing::error!("{} {} failed: {}", method, url, e);
            Error::RequestFailed
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
                message,
            });
        }

        // Mutation endpoints may answer with an empty body.
        let text = if body.trim().is_empty() { "null" } else { &body };
        serde_json::from_str::<T>(text).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::Decode(e.to_string())
        })
    }

    // -- Generic CRUD --

    /// Fetches one page of any CRUD collection.
    pub async fn list<R: Resource>(
        &self,
        query: &ListQuery<R::SortBy>,
    ) -> Result<PaginatedResponse<R>, Error> {
        let mut url = query.add_to_url(&self.get_url(R::PATH)?);
        for (key, value) in R::LIST_PARAMS {
            url.query_pairs_mut().append_pair(key, value);
        }
        self.send::<_, ()>(Method::GET, url, None).await
    }

    /// Fetches a single record by id.
    pub async fn get<R: Resource>(&self, id: &str) -> Result<R, Error> {
        let url = self.get_url(&R::item_path(id))?;
        self.send::<_, ()>(Method::GET, url, None).await
    }

    /// Creates a record from a full draft. Returns the backend's payload.
    pub async fn create<R: Resource, B: Serialize>(&self, draft: &B) -> Result<Value, Error> {
        let url = self.get_url(R::PATH)?;
        self.send(Method::POST, url, Some(draft)).await
    }

    /// Replaces a record with a full draft. Returns the backend's payload.
    pub async fn update<R: Resource, B: Serialize>(
        &self,
        id: &str,
        draft: &B,
    ) -> Result<Value, Error> {
        let url = self.get_url(&R::item_path(id))?;
        self.send(Method::PUT, url, Some(draft)).await
    }

    /// Deletes a record. Returns the backend's payload.
    pub async fn delete<R: Resource>(&self, id: &str) -> Result<Value, Error> {
        let url = self.get_url(&R::item_path(id))?;
        self.send::<_, ()>(Method::DELETE, url, None).await
    }

    // -- Classes --

    /// Fetches a page of classes matching the given query.
    pub async fn get_classes(
        &self,
        query: &ClassQuery,
    ) -> Result<PaginatedResponse<ClassRecord>, Error> {
        self.list::<ClassRecord>(query).await
    }

    pub async fn get_class(&self, class_id: &str) -> Result<ClassRecord, Error> {
        self.get::<ClassRecord>(class_id).await
    }

    pub async fn add_class(&self, class: &ClassDraft) -> Result<Value, Error> {
        self.create::<ClassRecord, _>(class).await
    }

    pub async fn update_class(&self, class_id: &str, class: &ClassDraft) -> Result<Value, Error> {
        self.update::<ClassRecord, _>(class_id, class).await
    }

    pub async fn delete_class(&self, class_id: &str) -> Result<Value, Error> {
        self.delete::<ClassRecord>(class_id).await
    }

    // -- Teachers --

    /// Fetches a page of teachers matching the given query.
    pub async fn get_teachers(
        &self,
        query: &TeacherQuery,
    ) -> Result<PaginatedResponse<TeacherRecord>, Error> {
        self.list::<TeacherRecord>(query).await
    }

    pub async fn get_teacher(&self, teacher_id: &str) -> Result<TeacherRecord, Error> {
        self.get::<TeacherRecord>(teacher_id).await
    }

    pub async fn add_teacher(&self, teacher: &TeacherDraft) -> Result<Value, Error> {
        self.create::<TeacherRecord, _>(teacher).await
    }

    pub async fn update_teacher(
        &self,
        teacher_id: &str,
        teacher: &TeacherDraft,
    ) -> Result<Value, Error> {
        self.update::<TeacherRecord, _>(teacher_id, teacher).await
    }

    pub async fn delete_teacher(&self, teacher_id: &str) -> Result<Value, Error> {
        self.delete::<TeacherRecord>(teacher_id).await
    }

    // -- Students --

    /// Fetches a page of students, with each student's class populated.
    pub async fn get_students(
        &self,
        query: &StudentQuery,
    ) -> Result<PaginatedResponse<StudentRecord>, Error> {
        self.list::<StudentRecord>(query).await
    }

    pub async fn get_student(&self, student_id: &str) -> Result<StudentRecord, Error> {
        self.get::<StudentRecord>(student_id).await
    }

    pub async fn add_student(&self, student: &StudentDraft) -> Result<Value, Error> {
        self.create::<StudentRecord, _>(student).await
    }

    pub async fn update_student(
        &self,
        student_id: &str,
        student: &StudentDraft,
    ) -> Result<Value, Error> {
        self.update::<StudentRecord, _>(student_id, student).await
    }

    pub async fn delete_student(&self, student_id: &str) -> Result<Value, Error> {
        self.delete::<StudentRecord>(student_id).await
    }

    /// Enrols a student in a class. Assignment is its own relationship
    /// endpoint, not a field of the student update.
    pub async fn assign_student_to_class(
        &self,
        student_id: &str,
        class_id: &str,
    ) -> Result<Value, Error> {
        let url = self.get_url(&format!("/students/{}/assign-class", student_id))?;
        let body = serde_json::json!({ "classId": class_id });
        self.send(Method::POST, url, Some(&body)).await
    }

    /// Removes a student from their class.
    pub async fn unassign_student_from_class(&self, student_id: &str) -> Result<Value, Error> {
        let url = self.get_url(&format!("/students/{}/unassign-class", student_id))?;
        let body = serde_json::json!({});
        self.send(Method::POST, url, Some(&body)).await
    }

    // -- Analytics --

    /// Fetches the class with populated members and its gender breakdown.
    pub async fn get_class_analytics(&self, class_id: &str) -> Result<ClassAnalytics, Error> {
        let url = self.get_url(&format!("/analytics/class/{}", class_id))?;
        self.send::<_, ()>(Method::GET, url, None).await
    }

    /// Fetches salary expense and fee income for a month or a year.
    pub async fn get_financial_analytics(
        &self,
        query: &FinancialQuery,
    ) -> Result<FinancialSummary, Error> {
        let url = query.add_to_url(&self.get_url("/analytics/financials")?);
        self.send::<_, ()>(Method::GET, url, None).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
