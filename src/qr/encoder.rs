//! QR code encoder

use crate::error::{Error, Result};
use image::{GrayImage, Luma};
use qrcode::{EcLevel, QrCode};

/// Side length of one QR module in pixels
pub const MODULE_PIXELS: u32 = 10;

/// Width of the blank border around the symbol, in modules
pub const QUIET_ZONE_MODULES: u32 = 4;

/// Error correction tier (H, ~30% recovery)
const ECC_LEVEL: EcLevel = EcLevel::H;

/// QR code encoder
///
/// Picks the smallest QR version that fits the payload at level H, then
/// renders black modules on a white background.
pub struct QrEncoder {}

impl QrEncoder {
    /// Create a new QR encoder
    pub fn new() -> Self {
        Self {}
    }

    /// Encode a string into a QR code image.
    ///
    /// Fails with [`Error::QrEncode`] when the data does not fit in any QR
    /// version at level H. Nothing is truncated.
    pub fn encode_str(&self, data: &str) -> Result<GrayImage> {
        self.encode_bytes(data.as_bytes())
    }

    /// Encode bytes into a QR code image
    pub fn encode_bytes(&self, data: &[u8]) -> Result<GrayImage> {
        let code = QrCode::with_error_correction_level(data, ECC_LEVEL).map_err(|e| {
            Error::QrEncode(format!(
                "{} bytes at level {:?}: {}",
                data.len(),
                ECC_LEVEL,
                e
            ))
        })?;

        tracing::debug!(
            version = ?code.version(),
            modules = code.width(),
            ecc_level = ?ECC_LEVEL,
            "Encoded QR symbol"
        );

        let image = code
            .render::<Luma<u8>>()
            .quiet_zone(true)
            .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
            .dark_color(Luma([0]))
            .light_color(Luma([255]))
            .build();

        Ok(image)
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_uses_high_ecc() {
        let data = "https://cu-roll-call.vercel.app/?token=0123456789abcdef0123456789abcdef";
        let image = QrEncoder::new().encode_str(data).unwrap();

        let high = QrCode::with_error_correction_level(data, EcLevel::H).unwrap();
        let low = QrCode::with_error_correction_level(data, EcLevel::L).unwrap();
        assert!(high.width() > low.width());

        let expected = (high.width() as u32 + 2 * QUIET_ZONE_MODULES) * MODULE_PIXELS;
        assert_eq!(image.width(), expected);
    }

    #[test]
    fn test_image_geometry() {
        let encoder = QrEncoder::new();
        let data = "https://cu-roll-call.vercel.app/?token=0123456789abcdef0123456789abcdef";
        let image = encoder.encode_str(data).unwrap();

        let code = QrCode::with_error_correction_level(data, EcLevel::H).unwrap();
        let expected = (code.width() as u32 + 2 * QUIET_ZONE_MODULES) * MODULE_PIXELS;
        assert_eq!(image.width(), expected);
        assert_eq!(image.height(), expected);

        // Quiet zone is light, the finder pattern corner is dark.
        assert_eq!(image.get_pixel(0, 0), &Luma([255]));
        let corner = QUIET_ZONE_MODULES * MODULE_PIXELS;
        assert_eq!(image.get_pixel(corner, corner), &Luma([0]));
    }

    #[test]
    fn test_oversized_payload_is_rejected() {
        let encoder = QrEncoder::new();
        let data = "x".repeat(4000);
        let err = encoder.encode_str(&data).unwrap_err();
        assert!(matches!(err, Error::QrEncode(_)));
    }

    #[test]
    fn test_round_trip() {
        use crate::qr::QrDecoder;

        let encoder = QrEncoder::new();
        let decoder = QrDecoder::new();

        let original = "https://cu-roll-call.vercel.app/?token=ffeeddccbbaa99887766554433221100";
        let qr_image = encoder.encode_str(original).unwrap();
        let decoded = decoder.decode_gray(&qr_image).unwrap();

        assert_eq!(decoded.as_str(), Some(original));
    }
}
