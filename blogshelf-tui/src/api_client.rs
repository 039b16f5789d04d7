//! REST client for the remote collection store.

use crate::config::{AuthConfig, TuiConfig};
use blogshelf_core::{
    BlogEntry, BlogId, BlogQuery, CollectionClient, CreateOutcome, CreateWishlistRequest,
    DeleteOutcome, InsertResponse, TransportError, WishlistEntryId, WishlistItem,
};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{StatusCode, Url};

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
    #[error("Config error: {0}")]
    Config(String),
}

impl From<ApiClientError> for TransportError {
    fn from(err: ApiClientError) -> Self {
        match err {
            ApiClientError::Status { status, body } => TransportError::Status {
                status,
                message: body,
            },
            ApiClientError::Http(e) => match e.status() {
                Some(status) => TransportError::Status {
                    status: status.as_u16(),
                    message: e.to_string(),
                },
                None if e.is_decode() => TransportError::InvalidResponse {
                    reason: e.to_string(),
                },
                None => TransportError::Network {
                    reason: e.to_string(),
                },
            },
            ApiClientError::Serde(e) => TransportError::InvalidResponse {
                reason: e.to_string(),
            },
            ApiClientError::InvalidResponse(reason) => TransportError::InvalidResponse { reason },
            ApiClientError::Config(reason) => TransportError::Network { reason },
        }
    }
}

#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: Url,
    /// Sent on wishlist routes only.
    auth_header: HeaderMap,
}

impl RestClient {
    pub fn new(config: &TuiConfig) -> Result<Self, ApiClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        let base_url = Url::parse(config.api_base_url.trim_end_matches('/'))
            .map_err(|e| ApiClientError::Config(format!("api_base_url: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiClientError::Config(
                "api_base_url cannot be a base URL".to_string(),
            ));
        }
        let auth_header = build_auth_headers(&config.auth)?;
        Ok(Self {
            client,
            base_url,
            auth_header,
        })
    }

    /// Base URL joined with `segments`, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiClientError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiClientError::Config("api_base_url cannot be a base URL".to_string()))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    async fn list_blogs(&self, query: &BlogQuery) -> Result<Vec<BlogEntry>, ApiClientError> {
        let url = self.endpoint(&["blogs"])?;
        let response = self.client.get(url).query(query).send().await?;
        let value: serde_json::Value = parse_response(response).await?;
        decode_list(value)
    }

    async fn list_wishlist(&self, user_email: &str) -> Result<Vec<WishlistItem>, ApiClientError> {
        let url = self.endpoint(&["wishlist", user_email])?;
        let response = self
            .client
            .get(url)
            .headers(self.auth_header.clone())
            .send()
            .await?;
        let value: serde_json::Value = parse_response(response).await?;
        decode_list(value)
    }

    async fn create_entry(
        &self,
        blog_id: &BlogId,
        user_email: &str,
    ) -> Result<CreateOutcome, ApiClientError> {
        let url = self.endpoint(&["wishlist", blog_id.as_str()])?;
        let body = CreateWishlistRequest {
            blog_id: blog_id.clone(),
            user_email: user_email.to_string(),
        };
        let response = self
            .client
            .post(url)
            .headers(self.auth_header.clone())
            .json(&body)
            .send()
            .await?;
        if response.status() == StatusCode::CONFLICT {
            return Ok(CreateOutcome::Conflict);
        }
        let inserted: InsertResponse = parse_response(response).await?;
        Ok(CreateOutcome::Created {
            inserted_id: inserted.inserted_id,
        })
    }

    async fn delete_entry(&self, id: &WishlistEntryId) -> Result<DeleteOutcome, ApiClientError> {
        let url = self.endpoint(&["wishlist", id.as_str()])?;
        let response = self
            .client
            .delete(url)
            .headers(self.auth_header.clone())
            .send()
            .await?;
        parse_response(response).await
    }
}

#[async_trait::async_trait]
impl CollectionClient for RestClient {
    async fn fetch_blogs(&self, query: &BlogQuery) -> Result<Vec<BlogEntry>, TransportError> {
        Ok(self.list_blogs(query).await?)
    }

    async fn fetch_wishlist(&self, user_email: &str) -> Result<Vec<WishlistItem>, TransportError> {
        Ok(self.list_wishlist(user_email).await?)
    }

    async fn create_wishlist_entry(
        &self,
        blog_id: &BlogId,
        user_email: &str,
    ) -> Result<CreateOutcome, TransportError> {
        Ok(self.create_entry(blog_id, user_email).await?)
    }

    async fn delete_wishlist_entry(
        &self,
        id: &WishlistEntryId,
    ) -> Result<DeleteOutcome, TransportError> {
        Ok(self.delete_entry(id).await?)
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiClientError> {
    let status = response.status();
    if status.is_success() {
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(serde_json::from_str("{}")?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    } else {
        let body = response.text().await?;
        Err(ApiClientError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

/// Decode a JSON array; any other shape is an empty list.
fn decode_list<T: serde::de::DeserializeOwned>(
    value: serde_json::Value,
) -> Result<Vec<T>, ApiClientError> {
    match value {
        serde_json::Value::Array(_) => Ok(serde_json::from_value(value)?),
        other => {
            tracing::warn!(kind = json_kind(&other), "Expected a JSON array, treating as empty");
            Ok(Vec::new())
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

fn build_auth_headers(auth: &AuthConfig) -> Result<HeaderMap, ApiClientError> {
    let mut headers = HeaderMap::new();
    if let Some(jwt) = &auth.jwt {
        let value = format!("Bearer {}", jwt.trim());
        headers.insert(
            HeaderName::from_static("authorization"),
            HeaderValue::from_str(&value).map_err(|e| ApiClientError::Config(e.to_string()))?,
        );
    }
    Ok(headers)
}
