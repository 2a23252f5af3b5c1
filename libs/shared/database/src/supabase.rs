use std::marker::PhantomData;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION},
    Method, Response,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::store::{Record, RecordStore};

pub struct SupabaseClient {
    client: Client,
    base_url: String,
    anon_key: String,
    service_token: Option<String>,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.supabase_anon_key.clone(),
            service_token: config.supabase_service_token.clone(),
        }
    }

    fn get_headers(&self, auth_token: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert("apikey", HeaderValue::from_str(&self.anon_key)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = auth_token.or(self.service_token.as_deref()) {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }

        Ok(headers)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        auth_token: Option<&str>,
        body: Option<Value>,
        extra_headers: Option<HeaderMap>,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let mut headers = self.get_headers(auth_token)?;
        if let Some(extra) = extra_headers {
            headers.extend(extra);
        }

        let mut req = self.client.request(method, &url).headers(headers);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("API error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => anyhow!("Authentication error: {}", error_text),
                404 => anyhow!("Resource not found: {}", error_text),
                409 => anyhow!("Duplicate key: {}", error_text),
                _ => anyhow!("API error ({}): {}", status, error_text),
            });
        }

        Ok(response)
    }

    pub async fn request<T>(&self, method: Method, path: &str,
                            auth_token: Option<&str>, body: Option<Value>)
                            -> Result<T>
    where T: DeserializeOwned {
        self.request_with_headers(method, path, auth_token, body, None).await
    }

    pub async fn request_with_headers<T>(
        &self,
        method: Method,
        path: &str,
        auth_token: Option<&str>,
        body: Option<Value>,
        extra_headers: Option<HeaderMap>,
    ) -> Result<T>
    where T: DeserializeOwned {
        let response = self.send(method, path, auth_token, body, extra_headers).await?;
        let data = response.json::<T>().await?;
        Ok(data)
    }

    /// Fire a request whose response body is irrelevant.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        auth_token: Option<&str>,
        body: Option<Value>,
    ) -> Result<()> {
        self.send(method, path, auth_token, body, None).await?;
        Ok(())
    }
}

fn return_representation() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("Prefer", HeaderValue::from_static("return=representation"));
    headers
}

/// Insert, or replace the row with the same primary key.
fn upsert_representation() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "Prefer",
        HeaderValue::from_static("return=representation,resolution=merge-duplicates"),
    );
    headers
}

/// [`RecordStore`] over a PostgREST table named by [`Record::TABLE`].
pub struct SupabaseStore<T: Record> {
    supabase: Arc<SupabaseClient>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> SupabaseStore<T> {
    pub fn new(supabase: Arc<SupabaseClient>) -> Self {
        Self {
            supabase,
            _record: PhantomData,
        }
    }

    fn table_path(&self) -> String {
        format!("/rest/v1/{}", T::TABLE)
    }

    fn eq_path(&self, column: &str, value: &str) -> String {
        format!("{}?{}=eq.{}", self.table_path(), column, urlencoding::encode(value))
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for SupabaseStore<T> {
    async fn find_by_id(&self, key: &T::Key) -> Result<Option<T>> {
        let path = self.eq_path(T::KEY_COLUMN, &key.to_string());
        let mut rows: Vec<T> = self.supabase.request(
            Method::GET,
            &path,
            None,
            None,
        ).await?;

        Ok(if rows.is_empty() { None } else { Some(rows.swap_remove(0)) })
    }

    async fn find_all(&self) -> Result<Vec<T>> {
        let path = format!("{}?order={}.asc", self.table_path(), T::KEY_COLUMN);
        self.supabase.request(Method::GET, &path, None, None).await
    }

    async fn find_by(&self, column: &str, value: &str) -> Result<Vec<T>> {
        let path = format!(
            "{}&order={}.asc",
            self.eq_path(column, value),
            T::KEY_COLUMN,
        );
        self.supabase.request(Method::GET, &path, None, None).await
    }

    async fn save(&self, record: T) -> Result<T> {
        let body = serde_json::to_value(&record)?;
        debug!("Upserting into {}", T::TABLE);

        let mut rows: Vec<T> = self.supabase.request_with_headers(
            Method::POST,
            &self.table_path(),
            None,
            Some(body),
            Some(upsert_representation()),
        ).await?;

        if rows.is_empty() {
            return Err(anyhow!("Upsert into {} returned no rows", T::TABLE));
        }

        Ok(rows.swap_remove(0))
    }

    async fn delete(&self, key: &T::Key) -> Result<bool> {
        let path = self.eq_path(T::KEY_COLUMN, &key.to_string());
        let deleted: Vec<Value> = self.supabase.request_with_headers(
            Method::DELETE,
            &path,
            None,
            None,
            Some(return_representation()),
        ).await?;

        Ok(!deleted.is_empty())
    }

    async fn delete_all(&self) -> Result<()> {
        // PostgREST refuses unfiltered deletes, so filter on a column that is always set.
        let path = format!("{}?{}=not.is.null", self.table_path(), T::KEY_COLUMN);
        self.supabase.execute(Method::DELETE, &path, None, None).await
    }
}
