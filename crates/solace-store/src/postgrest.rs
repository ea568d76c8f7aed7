use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde_json::Value;

use crate::error::StoreError;
use crate::filter::Filter;
use crate::record::{Nested, RecordId, RecordStore};

/// RecordStore backed by a hosted PostgREST-style service (Supabase et al).
///
/// Requests carry the project API key; when a user access token is set it is
/// forwarded as the bearer so the backend's row-level security applies.
pub struct PostgrestStore {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    bearer: Option<String>,
}

impl PostgrestStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
            bearer: None,
        }
    }

    /// Forward a user access token with every request.
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    fn request(&self, method: Method, collection: &str) -> RequestBuilder {
        let url = format!("{}/rest/v1/{collection}", self.base_url);
        let bearer = self.bearer.as_deref().unwrap_or(&self.api_key);
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(bearer)
    }

    fn select_expr(nested: &[Nested]) -> String {
        let mut parts = vec!["*".to_string()];
        parts.extend(nested.iter().map(Nested::to_select));
        parts.join(", ")
    }

    fn filter_params(filter: &Filter) -> Vec<(String, String)> {
        filter
            .clauses()
            .iter()
            .map(|(column, value)| {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (column.clone(), format!("eq.{rendered}"))
            })
            .collect()
    }

    async fn select_rows(
        &self,
        collection: &str,
        filter: &Filter,
        select: &str,
    ) -> Result<Vec<Value>, StoreError> {
        let resp = self
            .request(Method::GET, collection)
            .query(&[("select", select)])
            .query(&Self::filter_params(filter))
            .send()
            .await
            .map_err(|e| StoreError::Fetch(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Fetch(format!(
                "{collection}: {status}: {body}"
            )));
        }

        resp.json::<Vec<Value>>()
            .await
            .map_err(|e| StoreError::Fetch(e.to_string()))
    }
}

#[async_trait]
impl RecordStore for PostgrestStore {
    async fn fetch_one(&self, collection: &str, filter: &Filter) -> Result<Value, StoreError> {
        let rows = self.select_rows(collection, filter, "*").await?;
        rows.into_iter().next().ok_or_else(|| StoreError::NotFound {
            collection: collection.to_string(),
        })
    }

    async fn fetch_all(
        &self,
        collection: &str,
        filter: &Filter,
        nested: &[Nested],
    ) -> Result<Vec<Value>, StoreError> {
        self.select_rows(collection, filter, &Self::select_expr(nested))
            .await
    }

    async fn fetch_composite(
        &self,
        collection: &str,
        filter: &Filter,
        nested: &[Nested],
    ) -> Result<Value, StoreError> {
        let rows = self
            .select_rows(collection, filter, &Self::select_expr(nested))
            .await?;
        rows.into_iter().next().ok_or_else(|| StoreError::NotFound {
            collection: collection.to_string(),
        })
    }

    async fn insert(&self, collection: &str, record: Value) -> Result<RecordId, StoreError> {
        let resp = self
            .request(Method::POST, collection)
            .header("Prefer", "return=representation")
            .json(&Value::Array(vec![record]))
            .send()
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Write(format!("{collection}: {status}: {body}")));
        }

        let rows: Vec<Value> = resp
            .json()
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;
        let id = rows
            .first()
            .and_then(|row| row.get("id"))
            .map(render_id)
            .ok_or_else(|| {
                StoreError::Write(format!("{collection}: insert returned no id"))
            })?;

        tracing::debug!(collection, id = %id, "record inserted");
        Ok(RecordId(id))
    }

    async fn update(
        &self,
        collection: &str,
        filter: &Filter,
        patch: Value,
    ) -> Result<(), StoreError> {
        let resp = self
            .request(Method::PATCH, collection)
            .query(&Self::filter_params(filter))
            .header("Prefer", "return=minimal")
            .json(&patch)
            .send()
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Write(format!("{collection}: {status}: {body}")));
        }

        Ok(())
    }
}

fn render_id(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
