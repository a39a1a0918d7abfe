use bytes::Bytes;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::config::Settings;
use crate::http::response::{Response, StatusCode};

/// Builds the status line and header block.
///
/// Lines end in CRLF. A blank line terminates the block, and a second one
/// follows when there is no body.
pub fn frame_head(
    version: &str,
    status: StatusCode,
    content_length: usize,
    content_type: &str,
    server_name: &str,
) -> String {
    let mut head = format!(
        "{} {} {}\r\n\
         Server: {}\r\n\
         Content-Type: {}\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n",
        version,
        status.as_u16(),
        status.reason_phrase(),
        server_name,
        content_type,
        content_length,
    );

    if content_length == 0 {
        head.push_str("\r\n");
    }

    head
}

/// A framed response: the header block goes out in one write, the body in
/// a second one.
pub struct ResponseWriter {
    head: String,
    body: Bytes,
}

impl ResponseWriter {
    pub fn new(version: &str, response: &Response, settings: &Settings) -> Self {
        let content_type = response
            .content_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(settings.default_mime_type.as_str());

        let head = frame_head(
            version,
            response.status,
            response.content_length(),
            content_type,
            &settings.server_name,
        );

        Self {
            head,
            body: response.body.clone(),
        }
    }

    pub fn head(&self) -> &str {
        &self.head
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub async fn write_to_stream<W>(&self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        write_buf(stream, self.head.as_bytes()).await?;

        if !self.body.is_empty() {
            write_buf(stream, &self.body).await?;
        }

        stream.flush().await?;
        Ok(())
    }
}

async fn write_buf<W>(stream: &mut W, buf: &[u8]) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0;

    while written < buf.len() {
        let n = stream.write(&buf[written..]).await?;

        if n == 0 {
            return Err(anyhow::anyhow!("connection closed while writing"));
        }

        written += n;
    }

    Ok(())
}
