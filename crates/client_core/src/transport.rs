use std::fmt;

use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use shared::error::ApiError;
use tracing::{debug, warn};
use url::{ParseError, Url};

use crate::{
    error::{ClientError, ClientResult},
    session::Session,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    fn to_reqwest(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
            Self::Delete => Method::DELETE,
        }
    }
}

/// Whether a call may go out without a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Fail locally with [`ClientError::MissingToken`] when the session has no token.
    Required,
    /// Send the header only when a token is present.
    Optional,
}

/// Backend resource path kept as raw segments. Segments are percent-encoded
/// when the request URL is built, so an id never spills into its neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPath {
    segments: Vec<String>,
}

impl ApiPath {
    /// Splits a fixed route such as `/api/articles` on `/`.
    pub fn new(route: &str) -> Self {
        Self {
            segments: route
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Appends one segment verbatim; `/` or `?` inside it stay part of it.
    pub fn join(mut self, segment: impl fmt::Display) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }
}

impl fmt::Display for ApiPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl From<&str> for ApiPath {
    fn from(route: &str) -> Self {
        Self::new(route)
    }
}

/// Thin JSON client over one fixed backend host. No retries and no timeout:
/// every failure reaches the caller exactly once.
#[derive(Clone, Debug)]
pub struct RestClient {
    http: Client,
    base_url: Url,
}

impl RestClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_http_client(Client::new(), base_url)
    }

    pub fn with_http_client(http: Client, base_url: &str) -> ClientResult<Self> {
        let base_url = Url::parse(base_url.trim().trim_end_matches('/'))?;
        if base_url.cannot_be_a_base() {
            return Err(ParseError::RelativeUrlWithCannotBeABaseBase.into());
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    fn endpoint(&self, path: &ApiPath) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(path.segments());
        Ok(url)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        session: &Session,
        path: impl Into<ApiPath>,
    ) -> ClientResult<T> {
        let path = path.into();
        let raw = self
            .execute(session, HttpMethod::Get, &path, None::<&()>, AuthPolicy::Required)
            .await?;
        decode(&path, &raw)
    }

    /// Returns `None` when the server acknowledged with an empty body.
    pub async fn post_json<B, T>(
        &self,
        session: &Session,
        path: impl Into<ApiPath>,
        body: &B,
        auth: AuthPolicy,
    ) -> ClientResult<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let path = path.into();
        let raw = self
            .execute(session, HttpMethod::Post, &path, Some(body), auth)
            .await?;
        decode_optional(&path, &raw)
    }

    pub async fn put_json<B, T>(
        &self,
        session: &Session,
        path: impl Into<ApiPath>,
        body: &B,
    ) -> ClientResult<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let path = path.into();
        let raw = self
            .execute(session, HttpMethod::Put, &path, Some(body), AuthPolicy::Required)
            .await?;
        decode_optional(&path, &raw)
    }

    /// PUT without a request body; the response body is ignored.
    pub async fn put_empty(&self, session: &Session, path: impl Into<ApiPath>) -> ClientResult<()> {
        self.execute(session, HttpMethod::Put, &path.into(), None::<&()>, AuthPolicy::Required)
            .await
            .map(|_| ())
    }

    pub async fn delete(&self, session: &Session, path: impl Into<ApiPath>) -> ClientResult<()> {
        self.execute(session, HttpMethod::Delete, &path.into(), None::<&()>, AuthPolicy::Required)
            .await
            .map(|_| ())
    }

    async fn execute<B>(
        &self,
        session: &Session,
        method: HttpMethod,
        path: &ApiPath,
        body: Option<&B>,
        auth: AuthPolicy,
    ) -> ClientResult<String>
    where
        B: Serialize + ?Sized,
    {
        let token = match auth {
            AuthPolicy::Required => Some(session.require_token()?),
            AuthPolicy::Optional => session.token(),
        };

        debug!(method = method.as_str(), %path, "http: request");
        let mut request = self
            .http
            .request(method.to_reqwest(), self.endpoint(path)?);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let transport_error = |source| ClientError::Transport {
            method: method.as_str(),
            path: path.to_string(),
            source,
        };
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let raw = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let source = ApiError::from_response(status.as_u16(), &raw);
            warn!(
                method = method.as_str(),
                %path,
                status = status.as_u16(),
                "http: request rejected"
            );
            return Err(ClientError::Http {
                method: method.as_str(),
                path: path.to_string(),
                source,
            });
        }

        Ok(raw)
    }
}

fn decode<T: DeserializeOwned>(path: &ApiPath, raw: &str) -> ClientResult<T> {
    serde_json::from_str(raw).map_err(|source| ClientError::Decode {
        path: path.to_string(),
        source,
    })
}

fn decode_optional<T: DeserializeOwned>(path: &ApiPath, raw: &str) -> ClientResult<Option<T>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    decode(path, raw).map(Some)
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
