//! ROLLCALL-QR command-line entrypoint

use anyhow::Context;
use clap::Parser;
use rollcall_qr::{LinkGenerator, RollCallConfig, logging};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "rollcall-qr",
    version,
    about = "Generate a roll-call check-in link and save it as a QR code"
)]
struct Cli {
    /// Image to write. Defaults to the configured output (cu_roll_call_qr.png).
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Optional configuration file (toml/yaml). Defaults to rollcall.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the result as JSON instead of human-readable text
    #[arg(long)]
    json: bool,

    /// Decode the written image and fail unless it carries the returned link
    #[arg(long)]
    verify: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = RollCallConfig::load(cli.config.as_deref())?;
    logging::init(&config.logging)?;

    let output = cli.output.unwrap_or(config.output.path);

    let generator = LinkGenerator::new();
    let generated = generator
        .write_to(&output)
        .with_context(|| format!("failed to write QR code to {}", output.display()))?;

    if cli.verify {
        generator
            .verify(&generated.path, &generated.link)
            .with_context(|| format!("{} did not verify", generated.path.display()))?;
        tracing::info!(path = %generated.path.display(), "QR code verified");
    }

    if cli.json {
        println!("{}", generated.to_json_string()?);
    } else {
        println!("QR Code URL: {}", generated.link);
    }

    Ok(())
}
