//! `ofs-server` is a mock server mimicking the REST surface of an `OFS`
//! fiscal device, so that client applications integrating with the real
//! hardware can be developed and tested against a fake one.
//!
//! The server reproduces the device authentication flow faithfully:
//! the PIN entry endpoint drives the [`ofs_device`] state machine, the
//! attention endpoint reports the resulting availability, and three
//! consecutive wrong PIN submissions lock the device out until an
//! external reset. Everything else on the surface, namely status,
//! invoice issuance, invoice search, and invoice retrieval, returns
//! fixed or fabricated fiscal data.
//!
//! Test-only hooks under `/mock` force the device into the locked or
//! unlocked state without going through the PIN flow.

#![deny(unsafe_code)]
#![deny(missing_docs)]

/// Server configuration along with the injectable invoice fault.
pub mod config;
/// Error management.
pub mod error;
/// Request routing and endpoint handlers.
pub mod routes;
/// The mock server.
pub mod server;
/// Shared state handed to the routing layer.
pub mod state;

/// Static and fabricated response payloads.
pub mod responses;

mod auth;
