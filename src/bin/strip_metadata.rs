// SPDX-License-Identifier: MPL-2.0
//! `strip-metadata`: removes image metadata and recompresses files in place.
//!
//! Intended to run from a pre-commit hook that passes the staged file paths
//! as arguments (and re-stages the rewritten files afterwards). Non-image
//! arguments are skipped, each image is processed independently, and the
//! process exits non-zero when any file failed.
//!
//! ```text
//! strip-metadata [--quality N] <file>...
//! ```

use iced_gallery::media::sanitize;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = pico_args::Arguments::from_env();
    let quality: u8 = match args.opt_value_from_str("--quality") {
        Ok(value) => value.unwrap_or(sanitize::DEFAULT_JPEG_QUALITY),
        Err(err) => {
            eprintln!("invalid --quality value: {err}");
            return ExitCode::FAILURE;
        }
    };

    let files: Vec<PathBuf> = args
        .finish()
        .into_iter()
        .map(PathBuf::from)
        .filter(|path| sanitize::is_strippable(path))
        .collect();

    if files.is_empty() {
        println!("No images to process");
        return ExitCode::SUCCESS;
    }

    println!("Processing {} image(s)...", files.len());
    let mut failures = 0usize;

    for path in &files {
        match sanitize::strip_file(path, quality) {
            Ok(outcome) => {
                println!(
                    "stripped {} ({:.1}% smaller)",
                    path.display(),
                    outcome.reduction_percent()
                );
            }
            Err(err) => {
                // One bad file must not stop the rest of the batch.
                eprintln!("failed to process {}: {err}", path.display());
                failures += 1;
            }
        }
    }

    if failures > 0 {
        eprintln!("{failures} of {} image(s) failed", files.len());
        ExitCode::FAILURE
    } else {
        println!("Successfully processed all images");
        ExitCode::SUCCESS
    }
}
