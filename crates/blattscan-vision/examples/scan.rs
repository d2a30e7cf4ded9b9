// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Example glue: load a photo, scan it, write the preview and the scanned
// result next to it. Everything outside the pipeline call is collaborator
// territory — decode, file paths, logging setup.
//
// Usage: cargo run --example scan -- <photo> [output-dir]

use blattscan_core::human_errors::humanize_error;
use blattscan_vision::{ImageCodec, ScanPipeline};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next() else {
        eprintln!("usage: scan <photo> [output-dir]");
        std::process::exit(2);
    };
    let out_dir = std::path::PathBuf::from(args.next().unwrap_or_else(|| ".".into()));

    let pipeline = ScanPipeline::new();
    let result = ImageCodec::open(&input)
        .map(ImageCodec::into_dynamic)
        .and_then(|image| pipeline.scan_image(&image));

    match result {
        Ok(output) => {
            let preview_path = out_dir.join("original.png");
            let scanned_path = out_dir.join("scanned.png");

            let save = ImageCodec::from_dynamic(output.original_preview).save(&preview_path);
            let save = save.and_then(|_| {
                ImageCodec::from_dynamic(image::DynamicImage::ImageLuma8(output.scanned))
                    .save(&scanned_path)
            });

            match save {
                Ok(()) => println!(
                    "wrote {} and {}",
                    preview_path.display(),
                    scanned_path.display()
                ),
                Err(err) => {
                    eprintln!("failed to write outputs: {}", err);
                    std::process::exit(1);
                }
            }
        }
        Err(err) => {
            let human = humanize_error(&err);
            eprintln!("{}", human.message);
            eprintln!("{}", human.suggestion);
            std::process::exit(1);
        }
    }
}
