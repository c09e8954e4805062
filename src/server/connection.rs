// src/server/connection.rs

use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use crate::exec::FAILURE_EXIT_CODE;
use crate::service::ImportService;
use crate::wire::codec::{self, CodecError, FrameDecoder};
use crate::wire::{ImportRequest, ImportResponse};

const READ_CHUNK: usize = 8192;

/// Serve requests on one connection until the peer disconnects.
///
/// Requests on a connection are answered one at a time, in order. A frame that
/// cannot be decoded closes the connection.
pub async fn handle_connection(
    mut stream: TcpStream,
    peer: SocketAddr,
    service: Arc<ImportService>,
    workers: Arc<Semaphore>,
) {
    let mut decoder = FrameDecoder::new();
    let mut buf = vec![0u8; READ_CHUNK];

    loop {
        let n = match stream.read(&mut buf).await {
            Ok(0) => {
                debug!(%peer, pending_bytes = decoder.buffer_len(), "client disconnected");
                return;
            }
            Ok(n) => n,
            Err(e) => {
                warn!(%peer, error = %e, "read error");
                return;
            }
        };
        decoder.extend(&buf[..n]);

        loop {
            let request: ImportRequest = match decoder.decode_next() {
                Ok(Some(request)) => request,
                Ok(None) => break,
                Err(e) => {
                    error!(%peer, error = %e, "malformed frame; closing connection");
                    return;
                }
            };

            let response = {
                let _permit = match workers.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        warn!(%peer, "worker pool closed; dropping connection");
                        return;
                    }
                };
                service.run_import(request).await
            };

            if let Err(e) = write_response(&mut stream, &response).await {
                warn!(%peer, error = %e, "failed to write response");
                return;
            }
        }
    }
}

async fn write_response(stream: &mut TcpStream, response: &ImportResponse) -> std::io::Result<()> {
    let frame = frame_response(response).map_err(std::io::Error::other)?;
    stream.write_all(&frame).await?;
    stream.flush().await
}

/// Frame `response`, replacing it with a small failure response when the
/// captured output does not fit in one frame.
pub fn frame_response(response: &ImportResponse) -> Result<Bytes, CodecError> {
    match codec::encode(response) {
        Err(CodecError::MessageTooLarge(size)) => {
            warn!(size, "job output exceeds frame limit; sending failure response");
            codec::encode(&ImportResponse {
                stdout: String::new(),
                stderr: format!("Response too large: {size} bytes"),
                exit_code: FAILURE_EXIT_CODE,
            })
        }
        other => other,
    }
}
