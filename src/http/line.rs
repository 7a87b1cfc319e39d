use std::fmt;

use crate::http::parser::ParseError;
use crate::http::status::{StatusCode, StatusRegistry, UnknownStatus};

/// First line of a request, e.g. `GET /index.html HTTP/1.1`.
///
/// Parsing only checks the shape (exactly three space-separated tokens); it
/// deliberately accepts any method token so the session can still answer an
/// unsupported method with `501` instead of dropping the connection. Method
/// and protocol policy belong to the validator and the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    method: String,
    url: String,
    protocol: String,
}

impl RequestLine {
    pub fn new(
        method: impl Into<String>,
        url: impl Into<String>,
        protocol: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            protocol: protocol.into(),
        }
    }

    /// Splits `line` on single ASCII spaces into exactly three tokens.
    ///
    /// Two tokens, four tokens, or empty tokens from doubled spaces all fail
    /// with [`ParseError::MalformedRequestLine`]; there is no partial success.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let tokens: Vec<&str> = line.split(' ').collect();
        match tokens.as_slice() {
            [method, url, protocol]
                if !method.is_empty() && !url.is_empty() && !protocol.is_empty() =>
            {
                Ok(Self::new(*method, *url, *protocol))
            }
            _ => Err(ParseError::MalformedRequestLine(line.to_string())),
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }
}

impl fmt::Display for RequestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.method, self.url, self.protocol)
    }
}

/// First line of a response, e.g. `HTTP/1.1 200 OK`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseLine {
    protocol: String,
    status: StatusCode,
}

impl ResponseLine {
    pub fn new(protocol: impl Into<String>, status: StatusCode) -> Self {
        Self {
            protocol: protocol.into(),
            status,
        }
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Formats the line, resolving the reason phrase through the process-wide
    /// [`StatusRegistry`]. Fails for codes that were never registered.
    pub fn format(&self) -> Result<String, UnknownStatus> {
        let reason = StatusRegistry::global().reason_for(self.status)?;
        Ok(format!(
            "{} {} {}",
            self.protocol,
            self.status.as_u16(),
            reason
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_three_tokens() {
        let line = RequestLine::parse("GET /index.html HTTP/1.1").unwrap();
        assert_eq!(line.method(), "GET");
        assert_eq!(line.url(), "/index.html");
        assert_eq!(line.protocol(), "HTTP/1.1");
    }

    #[test]
    fn rejects_two_tokens() {
        assert!(matches!(
            RequestLine::parse("GET /index.html"),
            Err(ParseError::MalformedRequestLine(_))
        ));
    }

    #[test]
    fn rejects_four_tokens() {
        assert!(matches!(
            RequestLine::parse("GET /index.html HTTP/1.1 extra"),
            Err(ParseError::MalformedRequestLine(_))
        ));
    }

    #[test]
    fn rejects_doubled_space() {
        assert!(matches!(
            RequestLine::parse("GET  /index.html HTTP/1.1"),
            Err(ParseError::MalformedRequestLine(_))
        ));
    }

    #[test]
    fn request_line_round_trips_through_display() {
        let text = "GET /a/b.html HTTP/1.0";
        assert_eq!(RequestLine::parse(text).unwrap().to_string(), text);
    }

    #[test]
    fn response_line_formats_with_reason() {
        let line = ResponseLine::new("HTTP/1.1", StatusCode::OK);
        assert_eq!(line.format().unwrap(), "HTTP/1.1 200 OK");
    }

    #[test]
    fn response_line_fails_for_unregistered_code() {
        let line = ResponseLine::new("HTTP/1.1", StatusCode(999));
        assert!(line.format().is_err());
    }
}
