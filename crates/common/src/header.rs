//! Header helpers shared by handlers and middleware

use axum::http::{
    header::{CONTENT_TYPE, InvalidHeaderValue},
    HeaderMap, HeaderName, HeaderValue,
};

/// Request correlation header
pub const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Content type fragments that can be appended to a `Content-Type` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    FormUrlEncoded,
    Json,
    Css,
    Html,
    Javascript,
    MultipartForm,
    Utf8,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::FormUrlEncoded => "application/x-www-form-urlencoded",
            ContentType::Json => "application/json",
            ContentType::Css => "text/css",
            ContentType::Html => "text/html",
            ContentType::Javascript => "text/javascript",
            ContentType::MultipartForm => "multipart/form-data",
            ContentType::Utf8 => "charset=utf-8",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append one `Content-Type` value per entry, preserving existing values
pub fn set_content_type(headers: &mut HeaderMap, types: &[ContentType]) {
    for content_type in types {
        headers.append(CONTENT_TYPE, HeaderValue::from_static(content_type.as_str()));
    }
}

/// Replace the request id header
pub fn set_request_id(headers: &mut HeaderMap, id: &str) -> Result<(), InvalidHeaderValue> {
    headers.insert(REQUEST_ID, HeaderValue::from_str(id)?);
    Ok(())
}

/// Read the request id header, if present and valid text
pub fn request_id(headers: &HeaderMap) -> Option<&str> {
    headers.get(REQUEST_ID).and_then(|v| v.to_str().ok())
}
