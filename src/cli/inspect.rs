//! Inspect command implementation.
//!
//! Classifies every embedded tile without touching the files, printing one
//! line per raster-fill layer. Useful for checking what a conversion would
//! do to an unfamiliar style.

use std::path::PathBuf;

use clap::Args;

use crate::classify::classify;
use crate::document::StyleModel;
use crate::error::Result;
use crate::output::{display_path, Printer};
use crate::qml::QmlStyle;
use crate::tile::decode_tile;

use super::collect_qml_files;

/// Show how each embedded tile would be classified, without converting
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// QML style files or directories to inspect
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

pub fn run(args: InspectArgs) -> Result<()> {
    let printer = Printer::new();
    let files = collect_qml_files(&args.paths)?;

    for path in &files {
        let style = QmlStyle::load(path)?;
        let refs = style.raster_fill_layers();
        if refs.is_empty() {
            printer.info("Unchanged", &format!("{}: no raster fills", display_path(path)));
            continue;
        }

        println!("{}:", display_path(path));
        for raster in &refs {
            let tile = match decode_tile(&raster.blob) {
                Ok(tile) => tile,
                Err(error) => {
                    printer.warning(
                        "Skipping",
                        &format!("symbol '{}' layer {}: {}", raster.symbol, raster.layer, error),
                    );
                    continue;
                }
            };
            let signature = classify(&tile);

            let tertiary = signature
                .colours
                .tertiary
                .map(|colour| format!(" third={}", colour))
                .unwrap_or_default();
            println!(
                "  {} [{}] {}x{} {} bg={} fg={}{}",
                raster.symbol,
                raster.layer,
                tile.width(),
                tile.height(),
                signature.kind,
                signature.colours.background,
                signature.colours.foreground,
                tertiary
            );
        }
    }

    Ok(())
}
