// src/server/client.rs

use std::io;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};

use crate::errors::{GatewayError, Result};
use crate::wire::codec::{self, FrameDecoder};
use crate::wire::{ImportRequest, ImportResponse};

/// Minimal caller for the `RunImport` RPC over one TCP connection.
pub struct ImportClient {
    stream: TcpStream,
    decoder: FrameDecoder,
}

impl ImportClient {
    pub async fn connect(addr: impl ToSocketAddrs) -> Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self {
            stream,
            decoder: FrameDecoder::new(),
        })
    }

    /// Send one request and wait for its response.
    pub async fn run_import(&mut self, request: &ImportRequest) -> Result<ImportResponse> {
        let frame = codec::encode(request)?;
        self.stream.write_all(&frame).await?;

        let mut buf = vec![0u8; 8192];
        loop {
            if let Some(response) = self.decoder.decode_next()? {
                return Ok(response);
            }
            let n = self.stream.read(&mut buf).await?;
            if n == 0 {
                return Err(GatewayError::IoError(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "server closed the connection before responding",
                )));
            }
            self.decoder.extend(&buf[..n]);
        }
    }
}
