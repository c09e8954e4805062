// src/server/mod.rs

//! TCP transport for the `RunImport` RPC.
//!
//! - [`listener`] owns the accept loop and the worker pool.
//! - [`connection`] serves framed requests on one connection.
//! - [`client`] is the matching caller side.

pub mod client;
pub mod connection;
pub mod listener;

pub use client::ImportClient;
pub use listener::Server;
