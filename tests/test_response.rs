use staticd::http::response::{Response, ResponseBuilder, NOT_FOUND_BODY, NOT_IMPLEMENTED_BODY};
use staticd::http::status::StatusCode;

#[test]
fn test_ok_response_invariants() {
    let resp = Response::ok("HTTP/1.1", "<h1>hi</h1>");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.header("Content-Length"), Some("11"));
    assert_eq!(resp.header("Content-Type"), Some("text/html"));
    assert!(resp.header("Date").is_some());
}

#[test]
fn test_not_found_uses_fixed_body() {
    let resp = Response::not_found("HTTP/1.1");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(resp.body(), NOT_FOUND_BODY);
    assert_eq!(
        resp.header("Content-Length"),
        Some(NOT_FOUND_BODY.len().to_string().as_str())
    );
}

#[test]
fn test_not_implemented_uses_fixed_body() {
    let resp = Response::not_implemented("HTTP/1.0");
    assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);
    assert_eq!(resp.body(), NOT_IMPLEMENTED_BODY);
}

#[test]
fn test_response_line_carries_request_protocol() {
    let resp = Response::ok("HTTP/1.0", "x");
    assert!(resp.to_wire().unwrap().starts_with("HTTP/1.0 200 OK\n"));
}

#[test]
fn test_serialization_round_trip_preserves_body_bytes() {
    let body = "<html><body>line one\nline two</body></html>";
    let resp = Response::ok("HTTP/1.1", body);

    let wire = resp.to_wire().unwrap();
    let (head, wire_body) = wire.split_once("\r\n").unwrap();

    assert_eq!(wire_body.as_bytes(), body.as_bytes());
    let mut head_lines = head.lines();
    assert_eq!(head_lines.next(), Some("HTTP/1.1 200 OK"));
    assert!(head.contains(&format!("Content-Length: {}", body.len())));
}

#[test]
fn test_empty_body_keeps_separator() {
    let resp = ResponseBuilder::new("HTTP/1.1", StatusCode::OK).build();
    let wire = resp.to_wire().unwrap();
    assert!(wire.ends_with("\r\n"));
}

#[test]
fn test_header_wire_order() {
    let resp = Response::ok("HTTP/1.1", "x");
    let names: Vec<&str> = resp.headers().iter().map(|(k, _)| k).collect();
    assert_eq!(names, vec!["Date", "Content-Type", "Content-Length"]);
}

#[test]
fn test_unregistered_status_code_fails_to_serialize() {
    let resp = ResponseBuilder::new("HTTP/1.1", StatusCode(499)).build();
    assert!(resp.to_wire().is_err());
}
