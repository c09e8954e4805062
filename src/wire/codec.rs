// src/wire/codec.rs

//! Length-prefixed codec for TCP framing
//!
//! All messages are framed as:
//! ```text
//! [ 4 bytes: length (u32, big-endian) ][ N bytes: protobuf message ]
//! ```

use bytes::{Buf, BufMut, Bytes, BytesMut};
use prost::Message;
use thiserror::Error;

/// Maximum message size (64 MiB). Job output is returned in one frame.
pub const MAX_MESSAGE_SIZE: u32 = 64 * 1024 * 1024;

const LEN_PREFIX: usize = 4;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Message too large: {0} bytes (max: {MAX_MESSAGE_SIZE})")]
    MessageTooLarge(usize),

    #[error("Invalid message length prefix: {0}")]
    InvalidLength(u32),

    #[error("Protobuf decode error: {0}")]
    DecodeError(#[from] prost::DecodeError),

    #[error("Protobuf encode error: {0}")]
    EncodeError(#[from] prost::EncodeError),
}

/// Encode a message into a length-prefixed byte buffer
pub fn encode<M: Message>(msg: &M) -> Result<Bytes, CodecError> {
    let mut buf = BytesMut::new();
    encode_into(msg, &mut buf)?;
    Ok(buf.freeze())
}

/// Encode a message directly into a provided buffer
pub fn encode_into<M: Message>(msg: &M, buf: &mut BytesMut) -> Result<(), CodecError> {
    let msg_len = msg.encoded_len();

    if msg_len > MAX_MESSAGE_SIZE as usize {
        return Err(CodecError::MessageTooLarge(msg_len));
    }

    buf.reserve(LEN_PREFIX + msg_len);
    buf.put_u32(msg_len as u32);
    msg.encode(buf)?;

    Ok(())
}

/// Try to decode a length-prefixed message from a buffer
///
/// Returns:
/// - `Ok(Some(msg))` if a complete message was decoded
/// - `Ok(None)` if more data is needed (nothing is consumed)
/// - `Err(...)` if the data is invalid
pub fn decode<M: Message + Default>(buf: &mut BytesMut) -> Result<Option<M>, CodecError> {
    if buf.len() < LEN_PREFIX {
        return Ok(None);
    }

    let msg_len = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);

    if msg_len > MAX_MESSAGE_SIZE {
        return Err(CodecError::InvalidLength(msg_len));
    }

    let total_len = LEN_PREFIX + msg_len as usize;
    if buf.len() < total_len {
        return Ok(None);
    }

    buf.advance(LEN_PREFIX);
    let msg_bytes = buf.split_to(msg_len as usize);
    let msg = M::decode(msg_bytes)?;

    Ok(Some(msg))
}

/// Accumulates bytes read from a stream and yields complete frames.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buffer: BytesMut,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(4096),
        }
    }

    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Call this repeatedly until it returns `Ok(None)` to drain all complete frames
    pub fn decode_next<M: Message + Default>(&mut self) -> Result<Option<M>, CodecError> {
        decode(&mut self.buffer)
    }

    /// Bytes buffered that do not yet form a complete frame.
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{Command, ImportRequest, ImportResponse};

    fn request() -> ImportRequest {
        ImportRequest::new(Command::Import, ["--source", "region.osm"])
    }

    #[test]
    fn length_prefix_matches_payload() {
        let encoded = encode(&request()).unwrap();
        let len_prefix = u32::from_be_bytes([encoded[0], encoded[1], encoded[2], encoded[3]]);
        assert_eq!(len_prefix as usize, encoded.len() - 4);

        let mut buf = BytesMut::from(&encoded[..]);
        let decoded: ImportRequest = decode(&mut buf).unwrap().unwrap();
        assert_eq!(decoded, request());
        assert!(buf.is_empty());
    }

    #[test]
    fn partial_frame_is_not_consumed() {
        let encoded = encode(&request()).unwrap();
        let mut buf = BytesMut::from(&encoded[..5]);

        let result: Option<ImportRequest> = decode(&mut buf).unwrap();
        assert!(result.is_none());
        assert_eq!(buf.len(), 5);
    }

    #[test]
    fn frame_decoder_handles_chunks_and_multiple_frames() {
        let first = encode(&request()).unwrap();
        let second = encode(&ImportRequest::new(Command::Reindex, Vec::<String>::new())).unwrap();

        let mut decoder = FrameDecoder::new();
        decoder.extend(&first[..3]);
        assert!(decoder.decode_next::<ImportRequest>().unwrap().is_none());

        decoder.extend(&first[3..]);
        decoder.extend(&second);

        let a: ImportRequest = decoder.decode_next().unwrap().unwrap();
        let b: ImportRequest = decoder.decode_next().unwrap().unwrap();
        assert_eq!(a.command, Command::Import as i32);
        assert_eq!(b.command, Command::Reindex as i32);
        assert!(decoder.decode_next::<ImportRequest>().unwrap().is_none());
        assert_eq!(decoder.buffer_len(), 0);
    }

    #[test]
    fn oversized_length_prefix_is_rejected() {
        let mut buf = BytesMut::new();
        buf.put_u32(MAX_MESSAGE_SIZE + 1);
        buf.put_bytes(0, 16);

        let result: Result<Option<ImportResponse>, _> = decode(&mut buf);
        assert!(matches!(result, Err(CodecError::InvalidLength(_))));
    }

    #[test]
    fn negative_exit_code_survives_framing() {
        let resp = ImportResponse {
            stdout: String::new(),
            stderr: "killed".into(),
            exit_code: -9,
        };
        let mut buf = BytesMut::from(&encode(&resp).unwrap()[..]);
        let decoded: ImportResponse = decode(&mut buf).unwrap().unwrap();
        assert_eq!(decoded.exit_code, -9);
    }
}
