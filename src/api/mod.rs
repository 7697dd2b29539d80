//! Thin gateway to the analysis backend.
//!
//! One text endpoint and one upload endpoint per tool. Bodies are returned as
//! raw JSON; interpreting the envelope is the panel's job.

use std::fmt;

use miette::Diagnostic;
use reqwest::{
    Client, RequestBuilder, Url,
    multipart::{Form, Part},
};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

mod request;

pub use request::{ToolRequest, UploadFile};

/// Multipart field the upload endpoints read the file from.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Error, Diagnostic)]
pub enum ApiError {
    #[error("source code is empty")]
    #[diagnostic(code(detectai::api::empty_source))]
    EmptySource,

    #[error("invalid backend url `{url}`: {reason}")]
    #[diagnostic(
        code(detectai::api::invalid_url),
        help("Use an absolute http(s) url, e.g. `detectai config set-backend http://127.0.0.1:8000`")
    )]
    InvalidUrl { url: String, reason: String },

    #[error("could not reach the backend at {url}")]
    #[diagnostic(
        code(detectai::api::transport),
        help("Check that the analysis backend is running and reachable")
    )]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("backend answered {status} for {url}")]
    #[diagnostic(code(detectai::api::status))]
    Status { url: String, status: u16 },

    #[error("backend response from {url} is not valid JSON")]
    #[diagnostic(code(detectai::api::decode))]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("can't read file {path}")]
    #[diagnostic(code(detectai::api::read_file))]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Analyze,
    Summarize,
    Optimize,
    SecurityScan,
}

impl Tool {
    pub const ALL: [Tool; 4] = [
        Tool::Analyze,
        Tool::Summarize,
        Tool::Optimize,
        Tool::SecurityScan,
    ];

    pub fn text_path(self) -> &'static str {
        match self {
            Tool::Analyze => "/analyze",
            Tool::Summarize => "/summarize",
            Tool::Optimize => "/optimize",
            Tool::SecurityScan => "/security-scan",
        }
    }

    pub fn file_path(self) -> &'static str {
        match self {
            Tool::Analyze => "/uploadFileToAnalyze",
            Tool::Summarize => "/uploadFileToSummarize",
            Tool::Optimize => "/uploadFileToOptimize",
            Tool::SecurityScan => "/uploadFileToScan",
        }
    }

    /// Top-level field wrapping this tool's result in a success body.
    pub fn envelope_key(self) -> &'static str {
        match self {
            Tool::Analyze => "analysis",
            Tool::Summarize => "summarization",
            Tool::Optimize => "optimization",
            Tool::SecurityScan => "scan",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Analyze => write!(f, "analyze"),
            Tool::Summarize => write!(f, "summarize"),
            Tool::Optimize => write!(f, "optimize"),
            Tool::SecurityScan => write!(f, "security-scan"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');

        let parsed = Url::parse(trimmed).map_err(|error| ApiError::InvalidUrl {
            url: base_url.to_string(),
            reason: error.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme `{}`", parsed.scheme()),
            });
        }

        Ok(Self {
            client: Client::new(),
            base_url: trimmed.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST `{code}` as JSON to the tool's text endpoint.
    pub async fn submit_text(&self, tool: Tool, code: &str) -> Result<Value, ApiError> {
        if code.trim().is_empty() {
            return Err(ApiError::EmptySource);
        }

        let url = self.endpoint(tool.text_path());
        debug!(%tool, %url, bytes = code.len(), "submitting source text");

        let request = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "code": code }));

        self.dispatch(url, request).await
    }

    /// POST the file as multipart form content to the tool's upload endpoint.
    pub async fn submit_file(&self, tool: Tool, file: &UploadFile) -> Result<Value, ApiError> {
        let url = self.endpoint(tool.file_path());
        debug!(%tool, %url, file = file.name(), bytes = file.len(), "uploading file");

        if file.is_empty() {
            warn!(%tool, file = file.name(), "uploading an empty file");
        }

        let part = Part::bytes(file.bytes().to_vec()).file_name(file.name().to_string());
        let form = Form::new().part(UPLOAD_FIELD, part);

        let request = self.client.post(&url).multipart(form);

        self.dispatch(url, request).await
    }

    pub async fn submit(&self, tool: Tool, request: &ToolRequest) -> Result<Value, ApiError> {
        match request {
            ToolRequest::Text(code) => self.submit_text(tool, code).await,
            ToolRequest::File(file) => self.submit_file(tool, file).await,
        }
    }

    async fn dispatch(&self, url: String, request: RequestBuilder) -> Result<Value, ApiError> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(source) => {
                warn!(%url, error = %source, "backend request failed");
                return Err(ApiError::Transport { url, source });
            }
        };

        let status = response.status();
        debug!(%url, %status, "backend responded");

        if !status.is_success() {
            warn!(%url, %status, "backend returned an error status");
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| ApiError::Decode { url, source })
    }
}
