use crate::http::headers::HeaderMap;
use crate::http::line::RequestLine;

/// A parsed HTTP request: request line, ordered headers, optional body.
///
/// Construct through [`RequestBuilder`], which keeps the body/header invariant:
/// whenever a non-empty body is set, `Content-Length` and `Content-Type` are
/// written at build time and never drift afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    line: RequestLine,
    headers: HeaderMap,
    body: Option<String>,
}

impl Request {
    pub fn line(&self) -> &RequestLine {
        &self.line
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Retrieves a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Whether the client asked for the connection to stay open.
    ///
    /// Matches the `Connection` header against `Keep-Alive` case-insensitively;
    /// a missing header means close after one exchange.
    pub fn keep_alive(&self) -> bool {
        self.header("Connection")
            .map(|v| v.eq_ignore_ascii_case("keep-alive"))
            .unwrap_or(false)
    }

    /// Serializes to the wire text carried inside a request frame:
    /// request line and headers newline-terminated, then `\r\n` plus the raw
    /// body only when a body is present.
    pub fn to_wire(&self) -> String {
        let mut text = String::new();
        text.push_str(&self.line.to_string());
        text.push('\n');
        for (name, value) in self.headers.iter() {
            if !value.is_empty() {
                text.push_str(name);
                text.push_str(": ");
                text.push_str(value);
                text.push('\n');
            }
        }
        if let Some(body) = &self.body {
            text.push_str("\r\n");
            text.push_str(body);
        }
        text
    }
}

/// Builder for [`Request`].
#[derive(Debug, Default)]
pub struct RequestBuilder {
    line: Option<RequestLine>,
    headers: HeaderMap,
    body: Option<String>,
    content_type: Option<String>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(mut self, line: RequestLine) -> Self {
        self.line = Some(line);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets the body and the content type it will be declared with.
    pub fn body(mut self, body: impl Into<String>, content_type: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.content_type = Some(content_type.into());
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        let line = self.line.ok_or("request line missing")?;
        let mut headers = self.headers;
        let body = self.body.filter(|b| !b.is_empty());
        if let Some(body) = &body {
            headers.insert("Content-Length", body.len().to_string());
            headers.insert(
                "Content-Type",
                self.content_type
                    .unwrap_or_else(|| "application/json".to_string()),
            );
        }
        Ok(Request { line, headers, body })
    }
}
