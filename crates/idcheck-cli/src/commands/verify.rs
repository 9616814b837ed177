//! Verify command - run the full face-match and OCR verification.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use idcheck_core::capture::{CapturedImage, ImageRole};
use idcheck_core::identity::rules::DateOrder;
use idcheck_core::identity::IdentityParser;
use idcheck_core::models::identity::ExtractionOutcome;
use idcheck_core::models::wizard::WizardStep;
use idcheck_core::verify::{VerificationAttempt, Verifier};

use super::load_config;
use crate::client::HttpServices;
use crate::output::{format_outcome, OutputFormat};

/// Arguments for the verify command.
#[derive(Args)]
pub struct VerifyArgs {
    /// Front of the ID card (image file or data: URL)
    #[arg(long, required = true)]
    front: String,

    /// Back of the ID card (image file or data: URL)
    #[arg(long, required = true)]
    back: String,

    /// Selfie of the card holder (image file or data: URL)
    #[arg(long, required = true)]
    selfie: String,

    /// Override the service base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Order dates by calendar instead of by text
    #[arg(long)]
    chronological: bool,
}

pub async fn run(args: VerifyArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = load_config(config_path)?;

    if let Some(base_url) = &args.base_url {
        config.services.base_url = base_url.clone();
    }

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    let front = load_step(&pb, WizardStep::FrontId, &args.front, ImageRole::Front)?;
    let back = load_step(&pb, WizardStep::BackId, &args.back, ImageRole::Back)?;
    let selfie = load_step(&pb, WizardStep::Selfie, &args.selfie, ImageRole::Selfie)?;
    let attempt = VerificationAttempt::new(front, back, selfie);

    let mut parser = IdentityParser::from_config(&config.extraction);
    if args.chronological {
        parser = parser.with_date_order(DateOrder::Chronological);
    }

    info!(
        "Verifying against {} and {}",
        config.services.face_match_url(),
        config.services.ocr_url()
    );

    let services = HttpServices::new(&config.services)?;
    let verifier = Verifier::new(&services, &services).with_parser(parser);

    let result = verifier
        .verify_with_progress(&attempt, |step, message| show_step(&pb, step, message))
        .await;

    let record = match result {
        Ok(record) => {
            pb.finish_with_message("Verified");
            record
        }
        Err(e) => {
            pb.abandon_with_message(style("Verification failed").red().to_string());
            return Err(e.into());
        }
    };

    let outcome = ExtractionOutcome {
        success: true,
        data: record,
    };
    let output = format_outcome(&outcome, args.format, config.output.pretty_json)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!();
        println!("{}", style("Verified Information").bold());
        println!("{}", output);
    }

    debug!("Total verification time: {:?}", start.elapsed());

    Ok(())
}

fn show_step(pb: &ProgressBar, step: WizardStep, message: &str) {
    pb.set_position(step.progress_percent() as u64);
    pb.set_message(format!("{} - {}", step, message));
}

fn load_step(
    pb: &ProgressBar,
    step: WizardStep,
    source: &str,
    role: ImageRole,
) -> anyhow::Result<CapturedImage> {
    show_step(pb, step, "Loading image...");
    let image = load_image(source, role)?;
    debug!(
        "{} loaded: {} bytes ({})",
        step.title(),
        image.len(),
        image.mime()
    );
    Ok(image)
}

/// Load a capture from a `data:` URL or an image file.
fn load_image(source: &str, role: ImageRole) -> anyhow::Result<CapturedImage> {
    if source.starts_with("data:") {
        return Ok(CapturedImage::from_data_url(source, role.upload_name())?);
    }

    let path = Path::new(source);
    if !path.exists() {
        anyhow::bail!("Image file not found: {}", path.display());
    }
    Ok(CapturedImage::from_path(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_image_from_data_url() {
        let image = load_image("data:image/png;base64,AQIDBA==", ImageRole::Selfie).unwrap();

        assert_eq!(image.file_name(), "selfie.jpg");
        assert_eq!(image.mime(), "image/png");
    }

    #[test]
    fn test_load_image_missing_file() {
        let err = load_image("/nonexistent/front.jpg", ImageRole::Front).unwrap_err();
        assert!(err.to_string().contains("Image file not found"));
    }
}
