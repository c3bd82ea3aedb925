use axum::http::HeaderValue;
use serde_json::{json, Value};
use std::path::Path;

/// The methodology document, read once at startup.
#[derive(Debug, Clone)]
pub struct Methodology {
    pub document: Value,
    /// The document's own `version`, used for its `X-GTI-Version` header.
    pub version: HeaderValue,
}

impl Methodology {
    /// Reads the YAML document at `path`. A missing or unparsable file is
    /// logged and replaced by a small placeholder document, so the server
    /// still starts.
    pub fn load(path: &Path, default_version: &str) -> Self {
        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|text| Self::parse(&text).map_err(|e| e.to_string()));

        match parsed {
            Ok(document) => {
                tracing::info!(path = %path.display(), "Loaded methodology document.");
                Self::from_document(document, default_version)
            }
            Err(error) => {
                tracing::error!(path = %path.display(), %error, "Failed to load methodology document.");
                Self::from_document(
                    json!({ "version": default_version, "error": "Methodology file not found" }),
                    default_version,
                )
            }
        }
    }

    pub fn parse(yaml: &str) -> Result<Value, serde_yml::Error> {
        serde_yml::from_str(yaml)
    }

    pub fn from_document(document: Value, default_version: &str) -> Self {
        let version = match document.get("version") {
            Some(Value::String(v)) => v.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => default_version.to_string(),
        };
        let version = HeaderValue::from_str(&version)
            .unwrap_or_else(|_| HeaderValue::from_static("0.1.0"));
        Self { document, version }
    }
}
