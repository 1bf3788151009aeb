//! Purpose: HTTP client for the platform's JSON:API (request construction + response decoding).
//! Exports: `Client`, `Response`, `DEFAULT_BASE_URL`, `DEFAULT_USER_AGENT`.
//! Role: Composes a `Transport` with the envelope decoder; services are thin callers of it.
//! Invariants: Paths resolve relative to a base URL that always ends with `/`.
//! Invariants: Non-2xx statuses become errors before any decoding is attempted.
//! Invariants: The client holds no mutable state between calls.
#![allow(clippy::result_large_err)]

use super::services::{CredentialService, ProgramService, ReportService};
use super::transport::{Method, RawResponse, Request, Transport, UreqTransport};
use crate::config::ClientConfig;
use crate::core::error::{Error, ErrorKind};
use crate::core::jsonapi::{self, Resource};
use crate::core::links::PageLinks;
use crate::core::paginate::{DEFAULT_PAGE_SIZE, Paginator};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use url::Url;

type ApiResult<T> = Result<T, Error>;

pub const DEFAULT_BASE_URL: &str = "https://api.hackerone.com/v1/";
pub const DEFAULT_USER_AGENT: &str = concat!("h1-rs/", env!("CARGO_PKG_VERSION"));
const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

#[derive(Clone)]
struct ClientInner {
    base_url: Url,
    user_agent: String,
    authorization: Option<String>,
    page_size: u32,
    transport: Arc<dyn Transport>,
}

/// Metadata of a completed call: status plus the document's listing links.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub links: PageLinks,
}

#[derive(Deserialize)]
struct ErrorDocument {
    #[serde(default)]
    errors: Vec<ErrorObject>,
}

#[derive(Deserialize)]
struct ErrorObject {
    title: Option<String>,
    detail: Option<String>,
    #[serde(default)]
    source: Option<Value>,
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let base_url = normalize_base_url(base_url.into())?;
        Ok(Self {
            inner: Arc::new(ClientInner {
                base_url,
                user_agent: DEFAULT_USER_AGENT.to_string(),
                authorization: None,
                page_size: DEFAULT_PAGE_SIZE,
                transport: Arc::new(UreqTransport::default()),
            }),
        })
    }

    pub fn from_config(config: &ClientConfig) -> ApiResult<Self> {
        config.validate()?;
        let mut client = Self::new(config.base_url.clone())?
            .with_user_agent(config.user_agent.clone())
            .with_page_size(config.page_size)
            .with_transport(UreqTransport::new(config.timeout));
        if let (Some(identifier), Some(token)) = (&config.api_identifier, &config.api_token) {
            client = client.with_basic_auth(identifier, token);
        }
        Ok(client)
    }

    /// Authenticate with an API token identifier and value (HTTP basic auth).
    pub fn with_basic_auth(self, identifier: &str, token: &str) -> Self {
        let encoded = BASE64.encode(format!("{identifier}:{token}"));
        self.update(|inner| inner.authorization = Some(format!("Basic {encoded}")))
    }

    pub fn with_user_agent(self, user_agent: impl Into<String>) -> Self {
        let user_agent = user_agent.into();
        self.update(|inner| inner.user_agent = user_agent)
    }

    pub fn with_page_size(self, page_size: u32) -> Self {
        self.update(|inner| inner.page_size = page_size)
    }

    pub fn with_transport(self, transport: impl Transport + 'static) -> Self {
        self.update(|inner| inner.transport = Arc::new(transport))
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.inner.user_agent
    }

    pub fn paginator(&self) -> Paginator {
        Paginator::new(self.inner.page_size)
    }

    pub fn programs(&self) -> ProgramService<'_> {
        ProgramService::new(self)
    }

    pub fn reports(&self) -> ReportService<'_> {
        ReportService::new(self)
    }

    pub fn credentials(&self) -> CredentialService<'_> {
        CredentialService::new(self)
    }

    /// Resolve `path` against the base URL. Leading slashes are ignored so paths stay under the API root.
    pub fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.inner
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| {
                Error::new(ErrorKind::Usage)
                    .with_message(format!("invalid request path {path:?}"))
                    .with_source(err)
            })
    }

    /// Append `segments` to the base URL, percent-encoding each one so an id stays a single
    /// path segment. Empty and dot segments are rejected.
    pub fn endpoint_segments(&self, segments: &[&str]) -> ApiResult<Url> {
        if let Some(segment) = segments
            .iter()
            .find(|segment| matches!(**segment, "" | "." | ".."))
        {
            return Err(Error::new(ErrorKind::Usage)
                .with_message(format!("invalid path segment {segment:?}"))
                .with_hint("ids must be non-empty and cannot be \".\" or \"..\""));
        }
        let mut url = self.inner.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                Error::new(ErrorKind::Usage).with_message("api base url cannot be a base")
            })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    /// Request for the endpoint named by `segments`; see [`Client::endpoint_segments`].
    pub fn request_at<B>(&self, method: Method, segments: &[&str], body: Option<&B>) -> ApiResult<Request>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint_segments(segments)?;
        self.request_for_url(method, url, body)
    }

    pub fn new_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult<Request>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        self.request_for_url(method, url, body)
    }

    pub fn request_for_url<B>(&self, method: Method, url: Url, body: Option<&B>) -> ApiResult<Request>
    where
        B: Serialize + ?Sized,
    {
        let mut request = Request::new(method, url)
            .with_header("Accept", JSON_CONTENT_TYPE)
            .with_header("User-Agent", self.inner.user_agent.clone());
        if let Some(authorization) = &self.inner.authorization {
            request = request.with_header("Authorization", authorization.clone());
        }
        if let Some(body) = body {
            let payload = serde_json::to_vec(body).map_err(|err| {
                Error::new(ErrorKind::Internal)
                    .with_message("failed to encode request json")
                    .with_source(err)
            })?;
            request = request
                .with_header("Content-Type", JSON_CONTENT_TYPE)
                .with_body(payload);
        }
        Ok(request)
    }

    /// Send a request whose response document holds a single resource.
    pub fn fetch<T: Resource>(&self, request: &Request) -> ApiResult<(T, Response)> {
        let raw = self.execute(request)?;
        let document = jsonapi::decode_document::<T>(&raw.body)
            .map_err(|err| err.with_url(request.url.as_str()))?;
        Ok((
            document.data,
            Response {
                status: raw.status,
                links: document.links,
            },
        ))
    }

    /// Send a request whose response document holds a list of resources.
    pub fn fetch_list<T: Resource>(&self, request: &Request) -> ApiResult<(Vec<T>, Response)> {
        let raw = self.execute(request)?;
        let document = jsonapi::decode_list_document::<T>(&raw.body)
            .map_err(|err| err.with_url(request.url.as_str()))?;
        Ok((
            document.data,
            Response {
                status: raw.status,
                links: document.links,
            },
        ))
    }

    /// Send a request and ignore the response body.
    pub fn send(&self, request: &Request) -> ApiResult<Response> {
        let raw = self.execute(request)?;
        Ok(Response {
            status: raw.status,
            links: PageLinks::default(),
        })
    }

    fn execute(&self, request: &Request) -> ApiResult<RawResponse> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let raw = self.inner.transport.send(request)?;
        if raw.is_success() {
            return Ok(raw);
        }
        let err = error_from_response(&raw).with_url(request.url.as_str());
        tracing::warn!(
            method = %request.method,
            url = %request.url,
            status = raw.status,
            "request failed"
        );
        Err(err)
    }

    fn update(mut self, apply: impl FnOnce(&mut ClientInner)) -> Self {
        apply(Arc::make_mut(&mut self.inner));
        self
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url.as_str())
            .field("user_agent", &self.inner.user_agent)
            .field("authenticated", &self.inner.authorization.is_some())
            .field("page_size", &self.inner.page_size)
            .finish_non_exhaustive()
    }
}

fn normalize_base_url(raw: String) -> ApiResult<Url> {
    let mut url = Url::parse(&raw).map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message("invalid api base url")
            .with_source(err)
    })?;
    let scheme = url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(
            Error::new(ErrorKind::Usage).with_message("api base url must use http or https scheme")
        );
    }
    if url.cannot_be_a_base() {
        return Err(Error::new(ErrorKind::Usage).with_message("api base url cannot be a base"));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

fn error_from_response(raw: &RawResponse) -> Error {
    let kind = error_kind_from_status(raw.status);
    let err = Error::new(kind).with_status(raw.status);
    if let Ok(document) = serde_json::from_slice::<ErrorDocument>(&raw.body) {
        let summaries: Vec<String> = document.errors.iter().filter_map(error_summary).collect();
        if !summaries.is_empty() {
            return err.with_message(summaries.join("; "));
        }
    }
    err.with_message(format!("api error status {}", raw.status))
}

fn error_summary(object: &ErrorObject) -> Option<String> {
    let pointer = object
        .source
        .as_ref()
        .and_then(|source| source.get("pointer"))
        .and_then(Value::as_str);
    let text = match (&object.title, &object.detail) {
        (Some(title), Some(detail)) if title != detail => format!("{title}: {detail}"),
        (Some(title), _) => title.clone(),
        (None, Some(detail)) => detail.clone(),
        (None, None) => return None,
    };
    Some(match pointer {
        Some(pointer) => format!("{text} ({pointer})"),
        None => text,
    })
}

fn error_kind_from_status(status: u16) -> ErrorKind {
    match status {
        401 | 403 => ErrorKind::Permission,
        404 => ErrorKind::NotFound,
        429 => ErrorKind::RateLimited,
        400..=599 => ErrorKind::Api,
        _ => ErrorKind::Transport,
    }
}
