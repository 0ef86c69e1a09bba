use std::time::Duration;

use anyhow::anyhow;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::ClientError;

pub use reqwest::{Method, StatusCode};

/// Models for the backend resources.
///
/// These mirror the JSON the backend sends and accepts, field for field.
pub mod models;

#[cfg(test)]
pub mod mock;

/// Anything that can carry an [`ApiRequest`] to the backend and bring back its response.
///
/// The store is generic over this so that it can be driven without a network in tests.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Send a request and return the raw response.
    ///
    /// Only connection-level failures are errors. Any HTTP status, including 4xx and 5xx,
    /// is a successful [`ApiResponse`].
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError>;
}

/// A request to one of the backend's endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the backend base URL, without a leading slash.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    /// Bearer token sent in the `Authorization` header.
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            method,
            path: path.trim_start_matches('/').to_string(),
            query: Vec::new(),
            body: RequestBody::Empty,
            bearer: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn multipart(mut self, fields: Vec<FormField>) -> Self {
        self.body = RequestBody::Multipart(fields);
        self
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }
}

/// The body of an [`ApiRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Vec<FormField>),
}

/// One field of a multipart form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        upload: FileUpload,
    },
}

impl FormField {
    pub fn text(name: &str, value: impl ToString) -> Self {
        FormField::Text {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FormField::Text { name, .. } | FormField::File { name, .. } => name,
        }
    }
}

/// An image or other file picked by the user for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Read a file from disk, guessing its mime type from the extension.
    pub fn from_path(path: &std::path::Path) -> Result<Self, ClientError> {
        let bytes = std::fs::read(path)
            .map_err(|e| anyhow!("Error reading upload {}: {}", path.display(), e))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or(anyhow!("Upload path {} has no file name", path.display()))?;
        let mime = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(Self {
            file_name,
            mime,
            bytes,
        })
    }
}

/// The status and decoded body of a backend response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    /// The JSON body, or `Value::Null` if the body was empty or not JSON.
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    /// The human readable message the backend attached, if any.
    ///
    /// The backend is inconsistent and uses either `message` or `error`.
    pub fn message(&self) -> Option<String> {
        ["message", "error"]
            .iter()
            .find_map(|key| self.body.get(key).and_then(Value::as_str))
            .map(str::to_string)
    }
}

/// Wrapper for the result of an API call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<M> {
    Ok(M),
    /// The backend answered with a non-2xx status.
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },
    /// An authenticated call was answered with 401 or 403. The session has already been ended.
    SessionExpired,
    /// The call needs a session and there is none.
    NoSession,
}

impl ApiResult<Value> {
    /// Create an API result from a response.
    ///
    /// Any 2xx status is Ok and carries the JSON body. Everything else is Rejected, with the
    /// backend message if there was one.
    pub fn from_response(response: ApiResponse) -> Self {
        if response.status.is_success() {
            return ApiResult::Ok(response.body);
        }
        let message = response.message();
        ApiResult::Rejected {
            status: response.status,
            message,
        }
    }

    /// Deserialize the body of an Ok result into a model.
    pub fn decode<M>(self) -> Result<ApiResult<M>, ClientError>
    where
        M: DeserializeOwned,
    {
        Ok(match self {
            ApiResult::Ok(value) => ApiResult::Ok(serde_json::from_value(value)?),
            ApiResult::Rejected { status, message } => ApiResult::Rejected { status, message },
            ApiResult::SessionExpired => ApiResult::SessionExpired,
            ApiResult::NoSession => ApiResult::NoSession,
        })
    }
}

/// The API endpoint to retrieve resources from.
#[derive(Debug, Clone)]
pub struct Endpoint {
    url: String,
}

impl Endpoint {
    pub fn new(url: String) -> Self {
        let mut url = url.trim().to_string();
        if !url.ends_with('/') {
            url.push('/');
        }
        Self { url }
    }

    /// Append a path to retrieve a specific resource from the endpoint. e.g. pass in
    /// format!("equipos/{}/jugadores", equipo_id) to get the roster of a team.
    pub fn append_path(&self, path: &str) -> String {
        let mut full_url = self.url.clone();

        full_url.push_str(path.trim_start_matches('/'));

        full_url
    }

    /// Like [`Endpoint::append_path`], followed by an encoded query string.
    pub fn with_query(&self, path: &str, query: &[(String, String)]) -> String {
        let mut full_url = self.append_path(path);
        for (i, (key, value)) in query.iter().enumerate() {
            full_url.push(if i == 0 { '?' } else { '&' });
            full_url.push_str(&urlencoding::encode(key));
            full_url.push('=');
            full_url.push_str(&urlencoding::encode(value));
        }
        full_url
    }
}

/// The Habbofutbol REST backend, reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// The reqwest client used to make HTTP requests to the backend.
    client: Client,
    /// The API endpoint to request resources from.
    endpoint: Endpoint,
}

impl HttpTransport {
    pub fn new(backend_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: Endpoint::new(backend_url.to_string()),
        })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = self.endpoint.with_query(&request.path, &request.query);
        debug!("{} {}", request.method, url);

        let mut builder = self.client.request(request.method.clone(), &url);
        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Multipart(fields) => builder.multipart(into_form(fields)?),
        };

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(body) => body,
                Err(e) => {
                    debug!("Response from {} is not JSON ({}): {}", url, e, text);
                    Value::Null
                }
            }
        };

        Ok(ApiResponse { status, body })
    }
}

fn into_form(fields: Vec<FormField>) -> Result<Form, ClientError> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            FormField::Text { name, value } => form.text(name, value),
            FormField::File { name, upload } => {
                let part = Part::bytes(upload.bytes)
                    .file_name(upload.file_name)
                    .mime_str(&upload.mime)?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}
