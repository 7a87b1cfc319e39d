use thiserror::Error;

use crate::http::line::RequestLine;
use crate::http::request::{Request, RequestBuilder};

/// Errors raised while decoding wire text into messages.
///
/// All of these close the connection without a response attempt; the session
/// never guesses at a partially understood request.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),

    #[error("malformed header line: {0:?}")]
    MalformedHeaders(String),

    #[error("invalid request frame: {0}")]
    InvalidFrame(String),

    #[error("io error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// Decodes the text carried inside one request frame.
///
/// Expected shape: a request line and newline-terminated headers, then an
/// optional `\r\n`-prefixed raw body. The returned request is rebuilt through
/// [`RequestBuilder`] so the body/header invariant holds even for requests a
/// sloppy client framed by hand.
pub fn parse_request(text: &str) -> Result<Request, ParseError> {
    let (head, body) = match text.split_once("\r\n") {
        Some((head, body)) => (head, Some(body)),
        None => (text, None),
    };

    let mut lines = head.split('\n');
    let request_line = lines
        .next()
        .ok_or_else(|| ParseError::MalformedRequestLine(String::new()))?;
    let line = RequestLine::parse(request_line)?;

    let mut builder = RequestBuilder::new().line(line);
    let mut content_type = None;
    for header in lines {
        if header.is_empty() {
            continue;
        }
        let (name, value) = header
            .split_once(':')
            .ok_or_else(|| ParseError::MalformedHeaders(header.to_string()))?;
        let name = name.trim();
        let value = value.trim();
        if name.eq_ignore_ascii_case("Content-Type") {
            content_type = Some(value.to_string());
        }
        builder = builder.header(name, value);
    }

    if let Some(body) = body.filter(|b| !b.is_empty()) {
        builder = builder.body(
            body,
            content_type.unwrap_or_else(|| "application/json".to_string()),
        );
    }

    builder
        .build()
        .map_err(|e| ParseError::InvalidFrame(e.to_string()))
}

/// Scans bytes accumulated from a response stream for one complete response.
///
/// Returns `Ok(Some(len))` when the first `len` bytes form a whole response
/// (head, `\r\n` separator, and `Content-Length` bytes of body), `Ok(None)`
/// when more bytes are needed. Used by the client to read a response with a
/// plain blocking read instead of polling for available bytes.
pub fn response_extent(buf: &[u8]) -> Result<Option<usize>, ParseError> {
    let separator = match buf.windows(2).position(|w| w == b"\r\n") {
        Some(idx) => idx,
        None => return Ok(None),
    };
    let head = std::str::from_utf8(&buf[..separator])
        .map_err(|e| ParseError::InvalidFrame(e.to_string()))?;

    let mut content_length = 0usize;
    for header in head.split('\n').skip(1) {
        if header.is_empty() {
            continue;
        }
        let (name, value) = header
            .split_once(':')
            .ok_or_else(|| ParseError::MalformedHeaders(header.to_string()))?;
        if name.trim().eq_ignore_ascii_case("Content-Length") {
            content_length = value
                .trim()
                .parse()
                .map_err(|_| ParseError::MalformedHeaders(header.to_string()))?;
        }
    }

    let total = separator + 2 + content_length;
    if buf.len() >= total {
        Ok(Some(total))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_request_without_body() {
        let req = parse_request("GET /index.html HTTP/1.1\nHost: localhost\n").unwrap();
        assert_eq!(req.line().method(), "GET");
        assert_eq!(req.line().url(), "/index.html");
        assert_eq!(req.header("Host"), Some("localhost"));
        assert!(req.body().is_none());
    }

    #[test]
    fn parses_request_with_body() {
        let text = "POST /a.html HTTP/1.1\nHost: localhost\nContent-Type: application/json\nContent-Length: 2\r\n{}";
        let req = parse_request(text).unwrap();
        assert_eq!(req.body(), Some("{}"));
        assert_eq!(req.header("Content-Length"), Some("2"));
    }

    #[test]
    fn preserves_header_order() {
        let req = parse_request("GET /a.html HTTP/1.1\nHost: h\nAccept: text/html\nAccept-Language: en\n")
            .unwrap();
        let names: Vec<&str> = req.headers().iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["Host", "Accept", "Accept-Language"]);
    }

    #[test]
    fn rejects_header_without_colon() {
        let err = parse_request("GET /a.html HTTP/1.1\nBrokenHeader\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedHeaders(_)));
    }

    #[test]
    fn rejects_short_request_line() {
        let err = parse_request("GET /a.html\nHost: h\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedRequestLine(_)));
    }

    #[test]
    fn response_extent_waits_for_full_body() {
        let partial = b"HTTP/1.1 200 OK\nContent-Length: 5\n\r\nhe";
        assert_eq!(response_extent(partial).unwrap(), None);

        let full = b"HTTP/1.1 200 OK\nContent-Length: 5\n\r\nhello";
        assert_eq!(response_extent(full).unwrap(), Some(full.len()));
    }

    #[test]
    fn response_extent_handles_empty_body() {
        let full = b"HTTP/1.1 200 OK\nContent-Length: 0\n\r\n";
        assert_eq!(response_extent(full).unwrap(), Some(full.len()));
    }
}
