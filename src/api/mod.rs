//! REST API Client
//!
//! Typed bindings to the admin backend, organized by domain.

mod auth;
mod error;
mod groups;
mod orders;
mod organizations;
mod products;
mod users;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::Paginated;

pub use error::ApiError;
pub use groups::ParentRef;
pub use users::ActiveFilter;

pub type ApiResult<T> = Result<T, ApiError>;

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode an id for use in a URL path
pub(crate) fn segment(id: &str) -> String {
    utf8_percent_encode(id, PATH_SEGMENT).to_string()
}

#[derive(Serialize)]
struct LimitOnly {
    limit: u32,
}

/// HTTP client bound to one API root and, once signed in, one bearer token
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Same client, different credential
    pub fn with_token(&self, token: Option<String>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token,
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status.as_u16(), &body))
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Ok(response.json::<T>().await?)
    }

    pub(crate) async fn get_json<T, Q>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.send(self.request(Method::GET, path).query(query)).await?;
        Ok(response.json::<T>().await?)
    }

    pub(crate) async fn post_json<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        Ok(response.json::<T>().await?)
    }

    /// POST without a body; the response is not inspected
    pub(crate) async fn post_empty(&self, path: &str) -> ApiResult<()> {
        self.send(self.request(Method::POST, path)).await?;
        Ok(())
    }

    /// PUT a JSON body; the echoed record is not inspected
    pub(crate) async fn put_json<B>(&self, path: &str, body: &B) -> ApiResult<()>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::PUT, path).json(body)).await?;
        Ok(())
    }

    pub(crate) async fn post_multipart<T>(&self, path: &str, form: reqwest::multipart::Form) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::POST, path).multipart(form)).await?;
        Ok(response.json::<T>().await?)
    }

    /// Total size of a collection, fetched with `limit=1`
    pub async fn count(&self, collection: &str) -> ApiResult<u64> {
        let page: Paginated<serde_json::Value> =
            self.get_json(&format!("/{}", collection), &LimitOnly { limit: 1 }).await?;
        Ok(page.total)
    }
}
