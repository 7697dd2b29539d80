use std::path::Path;

use super::ApiError;

/// A file picked by the user, forwarded to the backend byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    name: String,
    bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ApiError> {
        let bytes = std::fs::read(path).map_err(|source| ApiError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;

        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(ToString::to_string)
            .unwrap_or_else(|| "upload".to_string());

        Ok(Self { name, bytes })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// The payload of one submission: typed source text or an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolRequest {
    Text(String),
    File(UploadFile),
}

impl ToolRequest {
    pub fn describe(&self) -> String {
        match self {
            ToolRequest::Text(code) => format!("{} bytes of source text", code.len()),
            ToolRequest::File(file) => format!("file {} ({} bytes)", file.name(), file.len()),
        }
    }
}
