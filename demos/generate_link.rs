//! Generate a check-in QR code, then read it back
//!
//! Usage: cargo run --example generate_link

use rollcall_qr::{CheckinLink, LinkGenerator, QrDecoder};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // One-shot helper: returns only the URL
    let url = rollcall_qr::generate(Some(Path::new("qr_output.png")))?;
    println!("✓ QR code saved to qr_output.png");
    println!("  Content: {}", url);

    // Same thing step by step, keeping the token around
    let generator = LinkGenerator::new();
    let generated = generator.write_to(Path::new("qr_checkin_example.png"))?;
    println!("✓ QR code saved to {}", generated.path.display());
    println!("  Token: {}", generated.link.token());

    let payload = QrDecoder::new().decode_file(&generated.path)?;
    let decoded = CheckinLink::parse(payload.as_str().unwrap_or_default())?;
    println!("  Decoded: {}", decoded);

    Ok(())
}
