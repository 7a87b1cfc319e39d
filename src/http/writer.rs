use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;
use crate::http::status::UnknownStatus;

/// Serializes a response once and flushes it to the client in a single write.
pub struct ResponseWriter {
    buffer: Vec<u8>,
}

impl ResponseWriter {
    /// Serialization happens here, so an unregistered status code surfaces
    /// before any bytes hit the socket.
    pub fn new(response: &Response) -> Result<Self, UnknownStatus> {
        Ok(Self {
            buffer: response.to_wire()?.into_bytes(),
        })
    }

    pub async fn write_to_stream<W>(&self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        stream.write_all(&self.buffer).await?;
        stream.flush().await?;
        Ok(())
    }
}
