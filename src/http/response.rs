use crate::http::headers::HeaderMap;
use crate::http::line::ResponseLine;
use crate::http::status::{StatusCode, UnknownStatus};

/// Fixed HTML body sent with 404 responses.
pub const NOT_FOUND_BODY: &str =
    "<html><title>Page Error</title><body>Page not found</body></html>";

/// Fixed HTML body sent with 501 responses.
pub const NOT_IMPLEMENTED_BODY: &str =
    "<html><title>Page Error</title><body>Unimplemented method</body></html>";

/// A complete HTTP response ready to be serialized.
///
/// Invariant: headers always carry `Content-Length` equal to the byte length
/// of `body` and a `Content-Type`. [`ResponseBuilder`] enforces both, so any
/// `Response` in the program is internally consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    line: ResponseLine,
    headers: HeaderMap,
    body: String,
}

impl Response {
    pub fn line(&self) -> &ResponseLine {
        &self.line
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn status(&self) -> StatusCode {
        self.line.status()
    }

    /// Serializes the full response: response line and headers
    /// newline-terminated, then the `\r\n` separator (always, even for an
    /// empty body), then the raw body.
    pub fn to_wire(&self) -> Result<String, UnknownStatus> {
        let mut text = String::new();
        text.push_str(&self.line.format()?);
        text.push('\n');
        for (name, value) in self.headers.iter() {
            text.push_str(name);
            text.push_str(": ");
            text.push_str(value);
            text.push('\n');
        }
        text.push_str("\r\n");
        text.push_str(&self.body);
        Ok(text)
    }
}

/// Builder for [`Response`].
///
/// Stamps the `Date`, `Content-Type` and `Content-Length` headers in that
/// order at build time, matching what the server always sends.
#[derive(Debug)]
pub struct ResponseBuilder {
    line: ResponseLine,
    headers: HeaderMap,
    body: String,
    content_type: String,
}

impl ResponseBuilder {
    pub fn new(protocol: impl Into<String>, status: StatusCode) -> Self {
        Self {
            line: ResponseLine::new(protocol, status),
            headers: HeaderMap::new(),
            body: String::new(),
            content_type: "text/html".to_string(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert("Date", chrono::Utc::now().to_rfc2822());
        headers.insert("Content-Type", self.content_type);
        headers.insert("Content-Length", self.body.len().to_string());
        for (name, value) in self.headers.iter() {
            headers.insert(name, value);
        }
        Response {
            line: self.line,
            headers,
            body: self.body,
        }
    }
}

impl Response {
    /// 200 response carrying `body` as `text/html`.
    pub fn ok(protocol: impl Into<String>, body: impl Into<String>) -> Self {
        ResponseBuilder::new(protocol, StatusCode::OK)
            .body(body)
            .build()
    }

    /// 404 response with the fixed not-found page.
    pub fn not_found(protocol: impl Into<String>) -> Self {
        ResponseBuilder::new(protocol, StatusCode::NOT_FOUND)
            .body(NOT_FOUND_BODY)
            .build()
    }

    /// 501 response with the fixed unimplemented-method page.
    pub fn not_implemented(protocol: impl Into<String>) -> Self {
        ResponseBuilder::new(protocol, StatusCode::NOT_IMPLEMENTED)
            .body(NOT_IMPLEMENTED_BODY)
            .build()
    }
}
