//! QR code decoder using rqrr

use crate::error::{Error, Result};
use crate::qr::QrPayload;
use image::{DynamicImage, GrayImage, ImageReader};
use std::path::Path;

/// QR code decoder
pub struct QrDecoder {}

impl QrDecoder {
    /// Create a new QR decoder with default settings
    pub fn new() -> Self {
        Self {}
    }

    /// Open an image file and decode the QR code it contains.
    ///
    /// The image format is sniffed from the file contents, not the extension.
    pub fn decode_file(&self, path: &Path) -> Result<QrPayload> {
        let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
        self.decode(&img)
    }

    /// Decode a QR code from an image
    pub fn decode(&self, img: &DynamicImage) -> Result<QrPayload> {
        let gray = img.to_luma8();

        self.decode_gray(&gray)
    }

    /// Decode a QR code from a grayscale image
    pub fn decode_gray(&self, img: &GrayImage) -> Result<QrPayload> {
        let mut prepared = rqrr::PreparedImage::prepare(img.clone());

        let grids = prepared.detect_grids();

        // Take the first detected QR code
        let grid = grids.first().ok_or(Error::NoQrCodeFound)?;

        match grid.decode() {
            Ok((meta, content)) => {
                tracing::debug!(
                    "Decoded QR: version={:?}, ecc_level={:?}, length={}",
                    meta.version,
                    meta.ecc_level,
                    content.len()
                );

                Ok(QrPayload::from_bytes(content.into_bytes()))
            }
            Err(e) => Err(Error::QrDecode(format!("Decode failed: {:?}", e))),
        }
    }
}

impl Default for QrDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_image_has_no_qr() {
        let decoder = QrDecoder::new();
        let blank = GrayImage::from_pixel(200, 200, image::Luma([255]));
        assert!(matches!(
            decoder.decode_gray(&blank),
            Err(Error::NoQrCodeFound)
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let decoder = QrDecoder::new();
        let err = decoder
            .decode_file(Path::new("/nonexistent/dir/qr.png"))
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
