//! `ofs-device` models the operator-facing state machine of an `OFS`
//! fiscal device: PIN entry, the availability flag reported to clients,
//! and the hard lockout reached after repeated wrong PIN submissions.
//!
//! A real device arbitrates operator access after tampering or lock
//! events. This crate reproduces that arbitration in memory so a mock
//! server can expose it over HTTP: a [`device::FiscalDevice`] is created
//! once at process start from configuration and mutated only through its
//! transition methods.
//!
//! All transitions are total functions. Every input maps to a defined
//! state and a [`pin::PinOutcome`] signal code; nothing panics and
//! nothing is retried internally.

#![deny(unsafe_code)]
#![deny(missing_docs)]

/// The device state machine along with its transitions.
pub mod device;
/// PIN submission outcomes and their wire codes.
pub mod pin;
