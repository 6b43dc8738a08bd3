//! QR code encoding and decoding
//!
//! The encoder renders check-in links at the highest error-correction tier so
//! printed codes survive smudges and partial occlusion. The decoder reads
//! images back, which lets callers confirm a written file carries the exact
//! link that was returned.

mod decoder;
mod encoder;

pub use decoder::QrDecoder;
pub use encoder::{MODULE_PIXELS, QUIET_ZONE_MODULES, QrEncoder};

/// A decoded QR code payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrPayload {
    /// The raw decoded data
    pub data: Vec<u8>,
    /// String representation if valid UTF-8
    pub text: Option<String>,
}

impl QrPayload {
    /// Create a new QR payload from raw bytes
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let text = String::from_utf8(data.clone()).ok();
        Self { data, text }
    }

    /// Get the payload as a string, if valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
