use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Most sessions allowed to run at once. Connections accepted beyond this
/// wait for a slot; they are never refused.
pub const MAX_ACTIVE_SESSIONS: usize = 5;

/// Fixed budget for one keep-alive session, measured from accept and never
/// reset per request. The client uses the same budget as its response-wait
/// deadline.
pub const SESSION_BUDGET: Duration = Duration::from_secs(100);

/// Server command line: `staticd <port> <root_dir>`.
#[derive(Debug, Parser)]
#[command(name = "staticd", about = "Serve static HTML files over HTTP/1.x")]
pub struct ServerArgs {
    /// Port to accept client connections on
    pub port: u16,

    /// Directory the served HTML files live in, relative to the working directory
    pub root_dir: PathBuf,
}

/// Client command line: `staticd-client <port> <hostname>`.
#[derive(Debug, Parser)]
#[command(
    name = "staticd-client",
    about = "Interactively send HTTP requests and print raw responses"
)]
pub struct ClientArgs {
    /// Server port to connect to
    pub port: u16,

    /// Server hostname to connect to
    pub hostname: String,
}
