//! Photo attachments, carried inside records as `data:` URIs.

use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fs;

const FALLBACK_MIME: &str = "application/octet-stream";

/// A fully encoded attachment. Only obtainable once encoding finished,
/// so a record can never be persisted ahead of its photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoBlob(String);

impl PhotoBlob {
    /// Read `path` and encode it as a data URI.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let p = expand_tilde(path);
        let bytes = fs::read(&p)
            .map_err(|e| AppError::Photo(format!("cannot read '{}': {e}", p.display())))?;
        Ok(Self::from_bytes(&bytes))
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mime = infer::get(bytes)
            .map(|t| t.mime_type())
            .unwrap_or(FALLBACK_MIME);
        Self(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_data_uri(self) -> String {
        self.0
    }
}

/// Split a base64 `data:` URI into its MIME type and raw bytes.
pub fn decode_data_uri(uri: &str) -> Option<(String, Vec<u8>)> {
    let rest = uri.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let mime = meta.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(payload.trim()).ok()?;
    Some((mime.to_string(), bytes))
}
