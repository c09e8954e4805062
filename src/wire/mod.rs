// src/wire/mod.rs

//! Wire protocol for the `RunImport` RPC.
//!
//! - [`messages`] holds the protobuf request/response types and their
//!   conversions to and from the core job types.
//! - [`codec`] frames messages over a byte stream.

pub mod codec;
pub mod messages;

pub use codec::{CodecError, FrameDecoder, MAX_MESSAGE_SIZE};
pub use messages::{Command, ImportRequest, ImportResponse};
