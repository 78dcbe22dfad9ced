use rquest::{Client, RequestBuilder};
use rquest_util::Emulation;
use http::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use http::{Method, StatusCode};
use serde::de::DeserializeOwned;
use crate::error::{Error, ResponseError, Result};
use crate::config::Settings;
use tracing::{error, debug, warn};

/// How the response body should be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseType {
    #[default]
    Json,
    Text,
    Blob,
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    /// Serialized to JSON text and sent with `Content-Type: application/json`.
    Json(serde_json::Value),
    /// Pre-encoded form payload, sent untouched.
    Form { content_type: String, bytes: Vec<u8> },
}

#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FetchRequest<'a> {
    pub url: &'a str,
    /// Replaces the configured base URL. `Some("")` allows absolute URLs.
    pub base_url: Option<&'a str>,
    pub response_type: ResponseType,
    pub options: RequestOptions,
}

impl<'a> FetchRequest<'a> {
    pub fn get(url: &'a str) -> Self {
        Self {
            url,
            ..Self::default()
        }
    }

    pub fn with_method(url: &'a str, method: Method) -> Self {
        Self {
            url,
            options: RequestOptions::method(method),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
    Blob(Vec<u8>),
}

impl ResponseBody {
    pub fn into_json(self) -> Option<serde_json::Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    headers: HeaderMap,
}

impl HttpClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut headers = HeaderMap::new();

        for (key, value) in settings.api.headers.iter() {
            match (
                HeaderName::from_bytes(key.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(header_name), Ok(header_value)) => {
                    headers.insert(header_name, header_value);
                    debug!(header_key = key, "Adding header");
                }
                _ => {
                    error!(header_key = key, "Invalid header value");
                    return Err(Error::InvalidHeader {
                        name: key.clone(),
                        value: value.clone(),
                    });
                }
            }
        }

        let emulation = emulation_from_name(&settings.http.emulation);
        debug!(
            emulation = ?emulation,
            base_url = %settings.api.base_url,
            "Creating client with emulation"
        );

        let client = Client::builder()
            .emulation(emulation)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.api.base_url.trim_end_matches('/').to_string(),
            headers,
        })
    }

    /// Performs one call and parses the body as requested.
    ///
    /// A 500 becomes [`Error::ServerError`] and a connect timeout becomes
    /// [`Error::Network`]; everything else is returned as produced.
    pub async fn fetch(&self, request: FetchRequest<'_>) -> Result<ResponseBody> {
        match self.send(request).await {
            Ok(body) => Ok(body),
            Err(e) => Err(classify(e)),
        }
    }

    /// Convenience over [`fetch`](Self::fetch) for JSON endpoints.
    pub async fn fetch_json<T: DeserializeOwned>(&self, request: FetchRequest<'_>) -> Result<T> {
        let url = request.url.to_string();
        let body = self
            .fetch(FetchRequest {
                response_type: ResponseType::Json,
                ..request
            })
            .await?;

        let value = body.into_json().unwrap_or(serde_json::Value::Null);
        serde_json::from_value(value).map_err(|e| {
            error!(
                error = %e,
                url = url,
                "Failed to decode response payload"
            );
            Error::from(e)
        })
    }

    fn build(&self, request: &FetchRequest<'_>) -> RequestBuilder {
        let base = request.base_url.unwrap_or(&self.base_url);
        let url = format!("{}{}", base, request.url);
        let options = &request.options;

        let mut builder = self.client.request(options.method.clone(), url.as_str());

        for (key, value) in self.headers.iter() {
            builder = builder.header(key, value);
        }

        let is_form = matches!(options.body, Some(RequestBody::Form { .. }));
        if !is_form && !options.headers.contains_key(CONTENT_TYPE) {
            builder = builder.header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        for (key, value) in options.headers.iter() {
            builder = builder.header(key, value);
        }

        match &options.body {
            Some(RequestBody::Json(value)) => {
                builder = builder.body(value.to_string());
            }
            Some(RequestBody::Form { content_type, bytes }) => {
                if !options.headers.contains_key(CONTENT_TYPE) {
                    builder = builder.header(CONTENT_TYPE, content_type.as_str());
                }
                builder = builder.body(bytes.clone());
            }
            None => {}
        }

        debug!(
            method = %options.method,
            url = url,
            "Creating request"
        );

        builder
    }

    async fn send(&self, request: FetchRequest<'_>) -> Result<ResponseBody> {
        let response = self.build(&request).send().await?;
        let status = response.status();
        let url = response.url().to_string();

        debug!(
            status = status.as_u16(),
            url = %url,
            "Response received"
        );

        if !status.is_success() {
            let body = error_body(response.bytes().await, status, &url);
            return Err(Error::Response(ResponseError::new(status, url, body)));
        }

        match request.response_type {
            ResponseType::Json => {
                let body = response.bytes().await?;
                let value = serde_json::from_slice(&body).map_err(|e| {
                    error!(
                        error = %e,
                        body = %String::from_utf8_lossy(&body),
                        "Invalid JSON response"
                    );
                    Error::from(e)
                })?;
                Ok(ResponseBody::Json(value))
            }
            ResponseType::Text => Ok(ResponseBody::Text(response.text().await?)),
            ResponseType::Blob => Ok(ResponseBody::Blob(response.bytes().await?.to_vec())),
        }
    }
}

/// Body of a non-2xx answer. An unreadable body is logged and left empty so
/// the status still reaches the caller.
fn error_body<B, E>(read: std::result::Result<B, E>, status: StatusCode, url: &str) -> Vec<u8>
where
    B: AsRef<[u8]>,
    E: std::fmt::Display,
{
    match read {
        Ok(bytes) => bytes.as_ref().to_vec(),
        Err(e) => {
            warn!(
                error = %e,
                status = status.as_u16(),
                url = url,
                "Failed to read error response body"
            );
            Vec::new()
        }
    }
}

fn classify(err: Error) -> Error {
    match err {
        Error::Response(e) if e.status == StatusCode::INTERNAL_SERVER_ERROR => {
            debug!(url = %e.url, "Mapping 500 to generic server error");
            Error::ServerError
        }
        Error::Http(e) if is_connect_timeout(&e) => {
            error!(error = %e, "An unexpected error occurred");
            Error::Network(e)
        }
        Error::Response(e) => Error::Response(e),
        other => {
            error!(error = %other, "An unexpected error occurred");
            other
        }
    }
}

fn is_connect_timeout(err: &rquest::Error) -> bool {
    timed_out_while_connecting(err.is_connect(), err.is_timeout(), err)
}

/// A connect failure counts as a timeout when the transport says so or an
/// I/O timeout sits somewhere in its sources.
fn timed_out_while_connecting(
    is_connect: bool,
    is_timeout: bool,
    err: &(dyn std::error::Error + 'static),
) -> bool {
    is_connect && (is_timeout || chain_timed_out(err))
}

/// Walks the error and its sources looking for an I/O timeout.
fn chain_timed_out(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::TimedOut {
                return true;
            }
        }
        current = e.source();
    }
    false
}

pub fn emulation_from_name(name: &str) -> Emulation {
    match name.to_ascii_lowercase().as_str() {
        "chrome133" => Emulation::Chrome133,
        "firefox136" => Emulation::Firefox136,
        "safari18_3" => Emulation::Safari18_3,
        "edge134" => Emulation::Edge134,
        other => {
            warn!(emulation = other, "Unknown emulation, falling back to chrome133");
            Emulation::Chrome133
        }
    }
}
