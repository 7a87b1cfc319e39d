use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::http::request::Request;

// One or more /segment parts of alphanumerics, ending in .htm or .html
// (any case). Rejects query strings, dot-dot segments and anything with
// non-alphanumeric segment characters.
static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(/[a-zA-Z0-9]+)+\.[hH][tT][mM][lL]?$").unwrap());

static PROTOCOL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^HTTP/[01]\.[0-9]$").unwrap());

/// The specific rule a request failed, with diagnostic text for the caller.
///
/// Validation is advisory: the server logs the violation and still processes
/// the request with whatever fields are present, while the client refuses to
/// send a request that fails. A typed variant (rather than a bare boolean)
/// leaves room for a 400-class server response later.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid URL {0:?}: expected /segment/.../<name>.html with alphanumeric segments")]
    InvalidUrl(String),

    #[error("invalid protocol {0:?}: expected HTTP/<0|1>.<digit>")]
    InvalidProtocol(String),

    #[error("missing or empty Host header")]
    MissingHost,
}

/// Checks a parsed request against the URL, protocol and required-header
/// rules. Pure predicate: no I/O, no side effects.
pub fn validate(request: &Request) -> Result<(), ValidationError> {
    let url = request.line().url();
    if !URL_PATTERN.is_match(url) {
        return Err(ValidationError::InvalidUrl(url.to_string()));
    }

    let protocol = request.line().protocol();
    if !PROTOCOL_PATTERN.is_match(protocol) {
        return Err(ValidationError::InvalidProtocol(protocol.to_string()));
    }

    match request.header("Host") {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(ValidationError::MissingHost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::line::RequestLine;
    use crate::http::request::RequestBuilder;

    fn request(method: &str, url: &str, protocol: &str, host: Option<&str>) -> Request {
        let mut builder = RequestBuilder::new().line(RequestLine::new(method, url, protocol));
        if let Some(host) = host {
            builder = builder.header("Host", host);
        }
        builder.build().unwrap()
    }

    #[test]
    fn accepts_well_formed_request() {
        let req = request("GET", "/index.html", "HTTP/1.1", Some("localhost"));
        assert_eq!(validate(&req), Ok(()));
    }

    #[test]
    fn accepts_nested_path_and_htm_extension() {
        let req = request("GET", "/docs/page1.HTM", "HTTP/1.0", Some("localhost"));
        assert_eq!(validate(&req), Ok(()));
    }

    #[test]
    fn rejects_query_string() {
        let req = request("GET", "/index.html?q=1", "HTTP/1.1", Some("localhost"));
        assert!(matches!(validate(&req), Err(ValidationError::InvalidUrl(_))));
    }

    #[test]
    fn rejects_dot_dot_traversal() {
        let req = request("GET", "/../secret.html", "HTTP/1.1", Some("localhost"));
        assert!(matches!(validate(&req), Err(ValidationError::InvalidUrl(_))));
    }

    #[test]
    fn rejects_non_html_extension() {
        let req = request("GET", "/image.png", "HTTP/1.1", Some("localhost"));
        assert!(matches!(validate(&req), Err(ValidationError::InvalidUrl(_))));
    }

    #[test]
    fn rejects_bad_protocol_token() {
        let req = request("GET", "/index.html", "HTTPS/1.1", Some("localhost"));
        assert!(matches!(
            validate(&req),
            Err(ValidationError::InvalidProtocol(_))
        ));

        let req = request("GET", "/index.html", "HTTP/2.0", Some("localhost"));
        assert!(matches!(
            validate(&req),
            Err(ValidationError::InvalidProtocol(_))
        ));
    }

    #[test]
    fn rejects_missing_host() {
        let req = request("GET", "/index.html", "HTTP/1.1", None);
        assert_eq!(validate(&req), Err(ValidationError::MissingHost));

        let req = request("GET", "/index.html", "HTTP/1.1", Some(""));
        assert_eq!(validate(&req), Err(ValidationError::MissingHost));
    }
}
