//! Wire codec for TPM command and response structures.
//!
//! TPM structures travel as big-endian fields with no alignment
//! padding: sized buffers carry a 2-byte length, unions carry a
//! leading algorithm selector, and whole structures can be wrapped in
//! a 4-byte length envelope for embedding in command parameters.
//!
//! Decoding is all-or-nothing at every level. A [`wire::Reader`] only
//! advances when the full field is available, a sized buffer checks
//! its declared length against the compile-time capacity before any
//! payload byte is read, and an unknown union selector fails before
//! the body is touched. Encoding mirrors this: a [`wire::Writer`]
//! never partially fills the destination.
//!
//! # Scope
//!
//! This crate is the structure layer only. Sessions, transports, and
//! command dispatch live above it.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod algs;
pub mod attributes;
pub mod buffer;
pub mod errors;
pub mod types;
pub mod wire;

pub use algs::{AlgId, EccCurve, HashAlg, SymMode};
pub use attributes::{NvAttributes, ObjectAttributes};
pub use buffer::Tpm2b;
pub use errors::{CodecError, Result};
pub use wire::{Enveloped, Marshal, Reader, Unmarshal, Writer};
