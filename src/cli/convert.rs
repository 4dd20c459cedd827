//! Convert command implementation.
//!
//! Rewrites QML files in place, replacing embedded raster-tile fills with
//! native vector symbol layers. Each file gets its own pattern cache.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::document::{convert, ConversionReport};
use crate::error::{Result, VectileError};
use crate::output::{display_path, plural, Printer};
use crate::qml::QmlStyle;

use super::collect_qml_files;

/// Convert embedded raster-tile fills to native vector symbol layers
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// QML style files or directories to convert
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Classify and report without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON conversion report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Per-file entry of the JSON report.
#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    #[serde(flatten)]
    report: ConversionReport,
}

pub fn run(args: ConvertArgs) -> Result<()> {
    let printer = Printer::new();
    let files = collect_qml_files(&args.paths)?;

    let mut file_reports = Vec::new();
    let mut total_layers = 0;

    for path in &files {
        let mut style = QmlStyle::load(path)?;
        let report = convert(&mut style)?;

        for skipped in &report.skipped {
            printer.warning(
                "Skipping",
                &format!(
                    "{}: symbol '{}' layer {}: {}",
                    display_path(path),
                    skipped.symbol,
                    skipped.layer,
                    skipped.reason
                ),
            );
        }

        if report.converted() {
            if !args.dry_run {
                style.save(path)?;
            }
            printer.status(
                "Converted",
                &format!(
                    "{} ({})",
                    display_path(path),
                    plural(report.layers_converted, "layer", "layers")
                ),
            );
            total_layers += report.layers_converted;
        } else {
            printer.info("Unchanged", &display_path(path));
        }

        file_reports.push(FileReport {
            path: path.display().to_string(),
            report,
        });
    }

    if let Some(report_path) = &args.report {
        let json =
            serde_json::to_string_pretty(&file_reports).map_err(|e| VectileError::Document {
                message: format!("Failed to serialize report: {}", e),
                help: None,
            })?;
        fs::write(report_path, json).map_err(|e| VectileError::Io {
            path: report_path.clone(),
            message: format!("Failed to write report: {}", e),
        })?;
    }

    printer.success(
        "Finished",
        &format!(
            "{} converted across {}{}",
            plural(total_layers, "layer", "layers"),
            plural(files.len(), "file", "files"),
            if args.dry_run { " (dry run)" } else { "" }
        ),
    );

    Ok(())
}
