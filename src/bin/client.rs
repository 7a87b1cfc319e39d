//! Interactive client: prompts for request fields, sends framed requests and
//! prints raw responses. All protocol logic lives in the library; this binary
//! is terminal I/O around it.

use std::io::Write as _;
use std::time::Instant;

use anyhow::Context;
use bytes::BytesMut;
use clap::Parser;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

use staticd::config::{ClientArgs, SESSION_BUDGET};
use staticd::http::framing::write_frame;
use staticd::http::line::RequestLine;
use staticd::http::parser::response_extent;
use staticd::http::request::{Request, RequestBuilder};
use staticd::http::validator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ClientArgs::parse();

    println!(
        "Trying to connect to {} on port {}",
        args.hostname, args.port
    );
    let mut stream = TcpStream::connect((args.hostname.as_str(), args.port))
        .await
        .context("could not connect to the server")?;
    let server_address = stream.peer_addr()?.to_string();
    println!("Connection to {server_address} has been established!");

    let started_at = Instant::now();
    loop {
        let (request, keep_alive) = match prompt_request(&server_address)? {
            Some(built) => built,
            None => {
                println!("Invalid HTTP Request. Please try again.");
                continue;
            }
        };

        let wire = request.to_wire();
        println!("Sending the following request to the server...\n");
        println!("{wire}");
        write_frame(&mut stream, &wire)
            .await
            .context("failed to send request")?;

        println!("Waiting for server response....");
        let deadline = SESSION_BUDGET.saturating_sub(started_at.elapsed());
        match timeout(deadline, read_response(&mut stream)).await {
            Ok(Ok(response)) => println!("Server response:\n{response}"),
            Ok(Err(e)) => {
                println!("Failed to read server response: {e}");
                break;
            }
            Err(_) => {
                println!("Timed out waiting for server response.");
                break;
            }
        }
        println!("===========RESPONSE ENDED============");

        if !keep_alive || started_at.elapsed() >= SESSION_BUDGET {
            break;
        }
    }

    println!("Client connection has been closed.");
    Ok(())
}

/// Prompts for one request. `None` means the input failed validation.
fn prompt_request(server_address: &str) -> anyhow::Result<Option<(Request, bool)>> {
    println!("\nEnter HTTP request as follows:");
    let line_text = prompt("<HTTPMethod> </filename.html> <HTTP protocol>")?;
    let line = match RequestLine::parse(line_text.trim()) {
        Ok(line) => line,
        Err(e) => {
            println!("Bad request line: {e}");
            return Ok(None);
        }
    };

    println!(
        "The current server implementation does not process request bodies;\n\
         this payload only demonstrates the request format."
    );
    let body = prompt("Enter a JSON payload, if any. Else press Enter.")?;
    let body = body.trim().to_string();
    if !body.is_empty() && serde_json::from_str::<serde_json::Value>(&body).is_err() {
        println!("Note: the payload is not valid JSON; sending it as-is.");
    }

    let reuse = prompt("Do you want the connection to be reused for further requests? (Y/N)")?;
    let keep_alive = reuse.trim().eq_ignore_ascii_case("y");

    let mut builder = RequestBuilder::new()
        .line(line)
        .header("Host", server_address)
        .header("Accept", "text/html")
        .header("Accept-Language", "en");
    if keep_alive {
        builder = builder.header("Connection", "Keep-Alive");
    }
    if !body.is_empty() {
        builder = builder.body(body, "application/json");
    }
    let request = builder.build().map_err(anyhow::Error::msg)?;

    // Pre-send validation: refuse to put a bad request on the wire.
    if let Err(violation) = validator::validate(&request) {
        println!("{violation}");
        return Ok(None);
    }

    Ok(Some((request, keep_alive)))
}

fn prompt(message: &str) -> std::io::Result<String> {
    println!("{message}");
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input)
}

/// Reads until one complete response (per its `Content-Length`) is buffered.
async fn read_response(stream: &mut TcpStream) -> anyhow::Result<String> {
    let mut buffer = BytesMut::with_capacity(4096);
    loop {
        if let Some(len) = response_extent(&buffer)? {
            let response = buffer.split_to(len);
            return Ok(String::from_utf8_lossy(&response).into_owned());
        }

        let n = stream.read_buf(&mut buffer).await?;
        if n == 0 {
            anyhow::bail!("server closed the connection before a full response arrived");
        }
    }
}
