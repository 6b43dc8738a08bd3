//! Check-in link generation and QR image output

use crate::error::{Error, Result};
use crate::link::CheckinLink;
use crate::qr::{QrDecoder, QrEncoder};
use crate::token::CheckinToken;
use image::{GrayImage, ImageFormat};
use serde::Serialize;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::Builder;

/// Output file used when the caller does not name one
pub const DEFAULT_OUTPUT_PATH: &str = "qr_code.png";

/// Generate a check-in link, write its QR image to `output_path` (or
/// [`DEFAULT_OUTPUT_PATH`]) and return the link.
pub fn generate(output_path: Option<&Path>) -> Result<String> {
    let path = output_path.unwrap_or_else(|| Path::new(DEFAULT_OUTPUT_PATH));
    let generated = LinkGenerator::new().write_to(path)?;
    Ok(generated.link.into_string())
}

/// Outcome of a successful generation
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedQr {
    /// Link encoded in the image
    #[serde(flatten)]
    pub link: CheckinLink,
    /// Where the image was written
    pub path: PathBuf,
}

impl GeneratedQr {
    /// Render as pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Produces check-in links and their QR images
#[derive(Default)]
pub struct LinkGenerator {
    encoder: QrEncoder,
}

impl LinkGenerator {
    /// Create a generator with the high error-correction encoder
    pub fn new() -> Self {
        Self {
            encoder: QrEncoder::new(),
        }
    }

    /// Create a fresh link without rendering anything
    pub fn generate_link(&self) -> Result<CheckinLink> {
        CheckinLink::new(CheckinToken::generate())
    }

    /// Render `link` as a QR image in memory
    pub fn render(&self, link: &CheckinLink) -> Result<GrayImage> {
        self.encoder.encode_str(link.as_str())
    }

    /// Generate a new link and write its QR image to `path`.
    ///
    /// The image is written to a temporary file beside `path` and renamed
    /// over it, so a failure never leaves a partial image under the target
    /// name. An existing file at `path` is replaced.
    pub fn write_to(&self, path: &Path) -> Result<GeneratedQr> {
        let link = self.generate_link()?;
        let image = self.render(&link)?;
        write_image_atomically(&image, path)?;

        tracing::info!(path = %path.display(), url = %link, "Wrote check-in QR code");

        Ok(GeneratedQr {
            link,
            path: path.to_path_buf(),
        })
    }

    /// Decode the image at `path` and check it carries exactly `expected`
    pub fn verify(&self, path: &Path, expected: &CheckinLink) -> Result<()> {
        let payload = QrDecoder::new().decode_file(path)?;
        let text = payload
            .as_str()
            .ok_or_else(|| Error::QrDecode("payload is not UTF-8".to_string()))?;

        let decoded = CheckinLink::parse(text)?;
        if decoded != *expected {
            return Err(Error::QrDecode(format!(
                "{} decodes to {decoded}, expected {expected}",
                path.display()
            )));
        }
        Ok(())
    }
}

fn write_image_atomically(image: &GrayImage, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut builder = Builder::new();
    builder.prefix(".rollcall-qr-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Same mode as File::create, the process umask still applies.
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        image.write_to(&mut writer, format)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::BASE_URL;

    #[test]
    fn test_generate_link_uses_base_url() {
        let link = LinkGenerator::new().generate_link().unwrap();
        assert!(link.as_str().starts_with(BASE_URL));
    }

    #[test]
    fn test_render_decodes_to_link() {
        let generator = LinkGenerator::new();
        let link = generator.generate_link().unwrap();
        let image = generator.render(&link).unwrap();

        let payload = QrDecoder::new().decode_gray(&image).unwrap();
        assert_eq!(payload.as_str(), Some(link.as_str()));
    }

    #[test]
    fn test_write_to_and_verify() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkin.png");
        let generator = LinkGenerator::new();

        let generated = generator.write_to(&path).unwrap();
        assert_eq!(generated.path, path);
        generator.verify(&path, &generated.link).unwrap();

        let other = generator.generate_link().unwrap();
        assert!(matches!(
            generator.verify(&path, &other),
            Err(Error::QrDecode(_))
        ));
    }

    #[test]
    fn test_verify_without_image_extension() {
        let dir = tempfile::tempdir().unwrap();
        let generator = LinkGenerator::new();

        for name in ["checkin", "out.txt"] {
            let path = dir.path().join(name);
            let generated = generator.write_to(&path).unwrap();
            generator.verify(&path, &generated.link).unwrap();

            let bytes = std::fs::read(&path).unwrap();
            assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"), "{name} is not PNG");
        }
    }

    #[test]
    fn test_json_output_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkin.png");
        let generated = LinkGenerator::new().write_to(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&generated.to_json_string().unwrap()).unwrap();
        assert_eq!(value["url"], generated.link.as_str());
        assert_eq!(value["token"], generated.link.token().to_string());
        assert_eq!(value["path"], path.display().to_string());
    }
}
