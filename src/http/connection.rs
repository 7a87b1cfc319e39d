use std::time::{Duration, Instant};

use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::http::framing::read_frame;
use crate::http::parser::parse_request;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::validator;
use crate::http::writer::ResponseWriter;
use crate::server::static_files::{ResourceError, StaticFiles};

/// One accepted connection, driven through the session state machine:
///
/// ```text
/// AwaitingRequest -> Processing -> Responding -+-> AwaitingRequest
///        |                            |        |     (keep-alive, budget left)
///        v                            v        v
///      Closed <----------------------------- Closed
/// ```
///
/// The session exclusively owns its socket; dropping the session on any exit
/// path releases it exactly once. A single fixed budget measured from session
/// start bounds the whole keep-alive exchange, and each blocking read carries
/// the remaining budget as its timeout.
pub struct Session {
    stream: TcpStream,
    files: StaticFiles,
    started_at: Instant,
    budget: Duration,
    state: SessionState,
}

enum SessionState {
    AwaitingRequest,
    Processing(Request),
    Responding(Response, bool),
    Closed,
}

impl Session {
    pub fn new(stream: TcpStream, files: StaticFiles, budget: Duration) -> Self {
        Self {
            stream,
            files,
            started_at: Instant::now(),
            budget,
            state: SessionState::AwaitingRequest,
        }
    }

    /// Runs the session to completion.
    ///
    /// A clean peer disconnect and an exhausted budget both end the loop with
    /// `Ok`; protocol and I/O failures bubble up for the dispatcher to log.
    /// Either way the socket is released when the session drops.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, SessionState::Closed) {
                SessionState::AwaitingRequest => {
                    self.state = match self.read_request().await? {
                        Some(request) => SessionState::Processing(request),
                        None => SessionState::Closed,
                    };
                }

                SessionState::Processing(request) => {
                    let keep_alive = request.keep_alive();
                    let response = self.process(&request).await?;
                    self.state = SessionState::Responding(response, keep_alive);
                }

                SessionState::Responding(response, keep_alive) => {
                    let writer = ResponseWriter::new(&response)?;
                    writer.write_to_stream(&mut self.stream).await?;
                    debug!(status = response.status().as_u16(), "response sent");

                    // The budget runs from session start and is never reset.
                    if keep_alive && self.started_at.elapsed() < self.budget {
                        self.state = SessionState::AwaitingRequest;
                    } else {
                        self.state = SessionState::Closed;
                    }
                }

                SessionState::Closed => break,
            }
        }

        Ok(())
    }

    /// Blocks for one framed request, bounded by the remaining session budget.
    ///
    /// `None` means the session is over without a request: the peer hung up
    /// cleanly, or the budget ran out while waiting.
    async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        let remaining = self.budget.saturating_sub(self.started_at.elapsed());
        if remaining.is_zero() {
            info!("session budget exhausted, closing");
            return Ok(None);
        }

        let frame = match timeout(remaining, read_frame(&mut self.stream)).await {
            Ok(result) => result?,
            Err(_) => {
                info!("session budget exhausted while waiting for a request, closing");
                return Ok(None);
            }
        };

        let text = match frame {
            Some(text) => text,
            None => {
                info!("peer disconnected");
                return Ok(None);
            }
        };

        debug!(bytes = text.len(), "request frame received");
        let request = parse_request(&text)?;

        // Advisory only: the server still serves what it can from a request
        // that fails the client-side rules.
        if let Err(violation) = validator::validate(&request) {
            warn!(%violation, "processing request despite validation failure");
        }

        Ok(Some(request))
    }

    /// Dispatches by method: `GET` goes to the filesystem, everything else
    /// short-circuits to 501 without touching it.
    async fn process(&self, request: &Request) -> anyhow::Result<Response> {
        let protocol = request.line().protocol();
        if request.line().method() != "GET" {
            return Ok(Response::not_implemented(protocol));
        }

        match self.files.resolve(request.line().url()).await {
            Ok(bytes) => {
                let body = String::from_utf8_lossy(&bytes).into_owned();
                Ok(Response::ok(protocol, body))
            }
            Err(ResourceError::NotFound(path)) => {
                debug!(path = %path.display(), "requested file not found");
                Ok(Response::not_found(protocol))
            }
            Err(err @ ResourceError::Io { .. }) => Err(err.into()),
        }
    }
}
