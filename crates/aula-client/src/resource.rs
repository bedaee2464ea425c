//! The resource client: typed CRUD + list calls against one endpoint.

use std::sync::Arc;

use futures::future::join_all;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ClientError, classify_response};
use crate::page::{Page, normalize_page, normalize_record};
use crate::transport::{Method, RawResponse, Transport};

/// Sort direction for a list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_param(self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }
}

/// One list request: page, page size, optional search and sort, plus any
/// fixed extra filters (e.g. `institucion_id` for campuses).
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
    pub search: Option<String>,
    pub sort: Option<(String, SortDir)>,
    pub extra: Vec<(String, String)>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
            search: None,
            sort: None,
            extra: Vec::new(),
        }
    }
}

impl PageRequest {
    /// Query parameters in the order the API expects. An empty search term
    /// is omitted entirely.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("per_page".to_string(), self.per_page.to_string()),
        ];
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            params.push(("search".to_string(), search.to_string()));
        }
        if let Some((field, dir)) = &self.sort {
            params.push(("sort_by".to_string(), field.clone()));
            params.push(("sort_dir".to_string(), dir.as_param().to_string()));
        }
        params.extend(self.extra.iter().cloned());
        params
    }
}

/// Result of a bulk delete: which ids went through and which did not.
/// Partial failure is reported, not collapsed into all-or-nothing.
#[derive(Debug, Default)]
pub struct BulkOutcome {
    pub succeeded: Vec<String>,
    pub failed: Vec<(String, ClientError)>,
}

impl BulkOutcome {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// CRUD + list calls for one REST resource.
#[derive(Clone)]
pub struct ResourceClient {
    transport: Arc<dyn Transport>,
    endpoint: String,
}

impl ResourceClient {
    pub fn new(transport: Arc<dyn Transport>, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.endpoint, id)
    }

    fn check(response: RawResponse) -> Result<RawResponse, ClientError> {
        if response.is_success() {
            Ok(response)
        } else {
            Err(classify_response(response.status, &response.body))
        }
    }

    pub async fn list<T: DeserializeOwned>(
        &self,
        request: &PageRequest,
    ) -> Result<Page<T>, ClientError> {
        let response = self
            .transport
            .execute(Method::Get, &self.endpoint, &request.to_query(), None)
            .await?;
        let response = Self::check(response)?;
        normalize_page(&response.body)
    }

    /// Fetch an unpaginated collection (bare-array endpoints).
    pub async fn list_all<T: DeserializeOwned>(&self) -> Result<Vec<T>, ClientError> {
        let response = self
            .transport
            .execute(Method::Get, &self.endpoint, &[], None)
            .await?;
        let response = Self::check(response)?;
        Ok(normalize_page(&response.body)?.items)
    }

    pub async fn get<T: DeserializeOwned>(&self, id: &str) -> Result<T, ClientError> {
        let response = self
            .transport
            .execute(Method::Get, &self.item_path(id), &[], None)
            .await?;
        let response = Self::check(response)?;
        normalize_record(&response.body)
    }

    pub async fn create<T: DeserializeOwned>(&self, body: Value) -> Result<T, ClientError> {
        let response = self
            .transport
            .execute(Method::Post, &self.endpoint, &[], Some(body))
            .await?;
        let response = Self::check(response)?;
        normalize_record(&response.body)
    }

    pub async fn update<T: DeserializeOwned>(
        &self,
        id: &str,
        body: Value,
    ) -> Result<T, ClientError> {
        let response = self
            .transport
            .execute(Method::Put, &self.item_path(id), &[], Some(body))
            .await?;
        let response = Self::check(response)?;
        normalize_record(&response.body)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let response = self
            .transport
            .execute(Method::Delete, &self.item_path(id), &[], None)
            .await?;
        Self::check(response)?;
        Ok(())
    }

    /// A `PUT` on a sub-path of the resource, for domain actions such as
    /// `PUT /grupos/{id}/estudiantes/{sid}/trasladar`.
    pub async fn put_action(&self, suffix: &str, body: Value) -> Result<Value, ClientError> {
        let path = format!("{}/{}", self.endpoint, suffix.trim_start_matches('/'));
        let response = self
            .transport
            .execute(Method::Put, &path, &[], Some(body))
            .await?;
        let response = Self::check(response)?;
        if response.body.is_empty() {
            Ok(Value::Null)
        } else {
            serde_json::from_slice(&response.body).map_err(|e| ClientError::Decode(e.to_string()))
        }
    }

    /// Delete every id concurrently and wait for all of them to settle.
    pub async fn bulk_delete(&self, ids: &[String]) -> BulkOutcome {
        let deletes = ids.iter().map(|id| {
            let client = self.clone();
            let id = id.clone();
            async move {
                let result = client.delete(&id).await;
                (id, result)
            }
        });

        let mut outcome = BulkOutcome::default();
        for (id, result) in join_all(deletes).await {
            match result {
                Ok(()) => outcome.succeeded.push(id),
                Err(err) => outcome.failed.push((id, err)),
            }
        }
        outcome
    }
}
