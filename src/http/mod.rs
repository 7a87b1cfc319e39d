//! HTTP/1.x message model and per-connection protocol handling.
//!
//! The submodules layer leaf-first:
//!
//! - **`status`**: status code to reason phrase registry
//! - **`line`**: request/response first-line types
//! - **`headers`**: insertion-ordered header mapping
//! - **`request`** / **`response`**: message types with builders
//! - **`parser`**: wire text to message decoding
//! - **`validator`**: URL/protocol/Host rules over a parsed request
//! - **`framing`**: length-prefixed request frames
//! - **`writer`**: single-write response serialization
//! - **`connection`**: the per-connection keep-alive session state machine
//!
//! # Session state machine
//!
//! ```text
//!        ┌─────────────────┐
//!        │ AwaitingRequest │ ← blocking framed read, budget-bounded
//!        └────────┬────────┘
//!                 │ request decoded
//!                 ▼
//!        ┌─────────────────┐
//!        │   Processing    │ ← GET -> static files, otherwise 501
//!        └────────┬────────┘
//!                 │ response built
//!                 ▼
//!        ┌─────────────────┐
//!        │   Responding    │ ← serialize + single write
//!        └────────┬────────┘
//!                 │ written
//!                 ├─ Keep-Alive and budget left → AwaitingRequest
//!                 └─ otherwise → Closed
//! ```

pub mod connection;
pub mod framing;
pub mod headers;
pub mod line;
pub mod parser;
pub mod request;
pub mod response;
pub mod status;
pub mod validator;
pub mod writer;
