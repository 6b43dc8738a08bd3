//! ROLLCALL-QR - check-in links for attendance, rendered as QR codes
//!
//! Each generated link points at the roll-call site and carries a fresh
//! random token, so every printed code is unique. The QR image is rendered
//! at the highest error-correction tier and written to disk atomically.
//!
//! # Features
//!
//! - **Tokens**: 128-bit random identifiers rendered as 32 lowercase hex chars
//! - **Links**: fixed base URL plus a single `token` query parameter
//! - **QR Processing**: high-ECC encoding and round-trip decoding
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! fn main() -> rollcall_qr::Result<()> {
//!     let url = rollcall_qr::generate(Some(Path::new("cu_roll_call_qr.png")))?;
//!     println!("QR Code URL: {url}");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod config;
pub mod error;
pub mod generator;
pub mod link;
pub mod logging;
pub mod qr;
pub mod token;

// Re-exports for convenience
pub use error::{Error, Result};

pub use config::{LogRotation, LoggingOptions, OutputOptions, RollCallConfig};
pub use generator::{DEFAULT_OUTPUT_PATH, GeneratedQr, LinkGenerator, generate};
pub use link::{BASE_URL, CheckinLink};
pub use qr::{QrDecoder, QrEncoder, QrPayload};
pub use token::CheckinToken;
