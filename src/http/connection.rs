use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use crate::config::Config;
use crate::http::parser::{REQUEST_BUFFER_SIZE, parse_request};
use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::static_files;

/// One accepted client connection, handled once and then closed.
pub struct Connection<S> {
    stream: S,
    config: Arc<Config>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, config: Arc<Config>) -> Self {
        Self {
            stream,
            config,
            state: ConnectionState::Reading,
        }
    }

    /// Drives the connection to `Closed`, then shuts the stream down.
    ///
    /// The stream is closed on every path, including malformed requests
    /// and I/O errors.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let result = self.drive().await;

        if let Err(e) = self.stream.shutdown().await {
            tracing::trace!(error = %e, "Shutdown after response failed");
        }

        result
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    if let Some(request) = self.read_request().await? {
                        self.state = ConnectionState::Processing(request);
                    }
                }

                ConnectionState::Processing(request) => {
                    let response = self.handle_request(&request).await;

                    tracing::info!(
                        status = response.status.as_u16(),
                        content_length = response.content_length(),
                        "Responding"
                    );

                    let writer =
                        ResponseWriter::new(&request.version, &response, &self.config.settings);
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(writer) => {
                    tracing::debug!("Response headers:\n{}", writer.head());

                    let limit = self.config.settings.write_timeout();
                    with_deadline(limit, writer.write_to_stream(&mut self.stream))
                        .await
                        .context("writing response")?;
                }

                ConnectionState::Closed => break,
            }
        }

        Ok(())
    }

    /// Reads one buffer and parses its request line.
    ///
    /// Returns `None` when the client sent nothing or the request is
    /// malformed; such connections are closed without a response.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        let mut buf = [0u8; REQUEST_BUFFER_SIZE];

        let limit = self.config.settings.read_timeout();
        let read = async { self.stream.read(&mut buf).await.map_err(anyhow::Error::from) };
        let n = with_deadline(limit, read).await.context("reading request")?;

        if n == 0 {
            tracing::debug!("Client closed connection before sending a request");
            return Ok(None);
        }

        match parse_request(&buf[..n]) {
            Ok(request) => {
                tracing::info!(request = %request.request_line(), "Request");
                Ok(Some(request))
            }
            Err(e) => {
                tracing::debug!(error = ?e, "Dropping malformed request");
                Ok(None)
            }
        }
    }

    async fn handle_request(&self, request: &Request) -> Response {
        match &request.method {
            Method::GET => static_files::get(&self.config, &request.target).await,
            Method::Other(_) => Response::method_not_allowed(),
        }
    }
}

async fn with_deadline<T, F>(limit: Option<Duration>, fut: F) -> anyhow::Result<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    match limit {
        Some(limit) => timeout(limit, fut).await.context("deadline elapsed")?,
        None => fut.await,
    }
}
