//! Length-prefixed request framing.
//!
//! A request travels as one opaque text block: a big-endian `u16` byte-length
//! prefix followed by that many bytes of UTF-8. Responses are not prefixed;
//! they are delimited by their own `Content-Length` header instead.

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::parser::ParseError;

/// Reads one framed text block.
///
/// Returns `Ok(None)` on a clean end-of-stream before any prefix byte
/// arrives, which is the normal way a peer hangs up between requests. A
/// stream that ends mid-frame, or a payload that is not UTF-8, is an
/// [`ParseError::InvalidFrame`].
pub async fn read_frame<R>(reader: &mut R) -> Result<Option<String>, ParseError>
where
    R: AsyncRead + Unpin,
{
    let mut prefix = [0u8; 2];
    match reader.read_exact(&mut prefix).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    }
    let len = u16::from_be_bytes(prefix) as usize;

    let mut payload = BytesMut::zeroed(len);
    reader.read_exact(&mut payload).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            ParseError::InvalidFrame(format!("stream ended inside a {len}-byte frame"))
        } else {
            e.into()
        }
    })?;

    String::from_utf8(payload.to_vec())
        .map(Some)
        .map_err(|e| ParseError::InvalidFrame(e.to_string()))
}

/// Writes one framed text block.
pub async fn write_frame<W>(writer: &mut W, text: &str) -> Result<(), ParseError>
where
    W: AsyncWrite + Unpin,
{
    let len = u16::try_from(text.len())
        .map_err(|_| ParseError::InvalidFrame(format!("{}-byte frame too large", text.len())))?;
    writer.write_all(&len.to_be_bytes()).await?;
    writer.write_all(text.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
